//! # tarot-deck
//!
//! Tarot reading core: deck catalog, fair shuffle, draw selection and a
//! resumable session state machine.
//!
//! ## Design Principles
//!
//! 1. **Fair Randomness**: Every orientation and every permutation index
//!    comes from an injected `RandomSource`. Production uses the OS CSPRNG;
//!    tests script the draws.
//!
//! 2. **Pure Transitions**: `session::reduce` maps a state and an action to
//!    a new state plus effects. `SessionMachine` wraps it with persistence.
//!
//! 3. **Positional Identity**: A card is its slot in the deck's canonical
//!    order. Images, restore and glyphs all key off that slot.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Session sequences use `im` vectors so
//!   every transition returns a new state cheaply.
//!
//! - **Best-Effort Persistence**: Snapshots are written after any change to
//!   the drawn cards or the view cursor. Store failures are logged and
//!   dropped; a bad snapshot on startup means a fresh session.
//!
//! ## Modules
//!
//! - `core`: State, actions, errors, randomness, configuration
//! - `cards`: Deck systems, catalog, builder, card types
//! - `shuffle`: Orientation and Fisher-Yates shuffle
//! - `session`: Reducer, controller, snapshots
//! - `persistence`: Key-value stores and the snapshot codec
//! - `assets`: Asset resolvers and fallback glyphs

pub mod assets;
pub mod cards;
pub mod core;
pub mod persistence;
pub mod session;
pub mod shuffle;

// Re-export commonly used types
pub use crate::core::{
    Action, Effect,
    SessionConfig,
    Result, SlotRejection, TarotError,
    OsRandom, RandomSource, SeededRandom, SequenceRandom,
    Screen, SessionState,
};

pub use crate::cards::{
    build_deck,
    ArcanaKind, AssetRef, Card, CardTemplate, DrawnCard,
    DeckCatalog, DeckDefinition, DeckSystem,
};

pub use crate::assets::{AssetResolver, DirectoryAssets, Glyph, NoAssets, StaticAssets};

pub use crate::persistence::{FileStore, KeyValueStore, MemoryStore, SnapshotStore};

pub use crate::session::{reduce, SessionMachine, SessionMachineBuilder, Snapshot, SnapshotCard, Transition};

pub use crate::shuffle::shuffle;
