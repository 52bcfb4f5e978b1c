//! Core types: state, actions, errors, randomness, configuration.
//!
//! This module holds the building blocks every other module uses. It knows
//! nothing about persistence or asset lookup.

pub mod action;
pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use action::{Action, Effect};
pub use config::{SessionConfig, DEFAULT_PULL_COUNT, DEFAULT_STORAGE_KEY, MAX_PULL_COUNT};
pub use error::{Result, SlotRejection, TarotError};
pub use rng::{OsRandom, RandomSource, SeededRandom, SeededRandomState, SequenceRandom};
pub use state::{Screen, SessionState};
