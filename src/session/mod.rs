//! Session: reducer, controller and persisted snapshot.

pub mod machine;
pub mod snapshot;

pub use machine::{reduce, Context, Effects, SessionMachine, SessionMachineBuilder, Transition};
pub use snapshot::{Snapshot, SnapshotCard};
