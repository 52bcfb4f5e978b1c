//! Error taxonomy for the tarot core.
//!
//! Nothing here is fatal. Callers driving the session can ignore every
//! variant: a rejected action leaves the state exactly as it was.

use thiserror::Error;

use super::state::Screen;

/// Why a grid pick was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotRejection {
    /// Slot index is past the end of the shuffled order.
    OutOfRange,
    /// Slot was already picked earlier in this reading.
    AlreadyPicked,
    /// `pull_count` cards have been drawn already.
    GridFull,
}

impl std::fmt::Display for SlotRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SlotRejection::OutOfRange => "out of range",
            SlotRejection::AlreadyPicked => "already picked",
            SlotRejection::GridFull => "grid is full",
        };
        f.write_str(text)
    }
}

/// Errors produced by the deck, shuffle and session layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TarotError {
    /// Pick rejected by the grid.
    #[error("invalid grid slot {slot}: {reason}")]
    InvalidSlot { slot: usize, reason: SlotRejection },

    /// Action is not legal on the current screen.
    #[error("action `{action}` is not accepted on screen {screen}")]
    InvalidTransition { screen: Screen, action: &'static str },

    /// Deck id is not present in the catalog.
    #[error("unknown deck '{0}'")]
    UnknownDeck(String),

    /// Pull count outside the configured range.
    #[error("pull count {0} is out of range")]
    InvalidPullCount(u32),

    /// Persisted snapshot failed validation.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// Key-value store read or write failed.
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),

    /// Configuration values are inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TarotError {
    /// Shorthand for an [`TarotError::InvalidSlot`].
    #[must_use]
    pub fn invalid_slot(slot: usize, reason: SlotRejection) -> Self {
        Self::InvalidSlot { slot, reason }
    }

    /// Shorthand for an [`TarotError::InvalidTransition`].
    #[must_use]
    pub fn invalid_transition(screen: Screen, action: &'static str) -> Self {
        Self::InvalidTransition { screen, action }
    }

    /// Shorthand for a [`TarotError::MalformedSnapshot`].
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSnapshot(reason.into())
    }

    /// Shorthand for a [`TarotError::PersistenceFailure`].
    #[must_use]
    pub fn persistence(reason: impl std::fmt::Display) -> Self {
        Self::PersistenceFailure(reason.to_string())
    }

    /// True for errors the session swallows instead of returning.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            TarotError::MalformedSnapshot(_) | TarotError::PersistenceFailure(_)
        )
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TarotError>;
