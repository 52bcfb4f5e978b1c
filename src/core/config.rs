//! Session configuration.
//!
//! Hosts configure the session at startup:
//! - pull count defaults and bounds
//! - the shuffle animation time box
//! - the storage key for the persisted snapshot
//! - the deck preselected on a fresh start

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{Result, TarotError};

/// Default number of cards to draw.
pub const DEFAULT_PULL_COUNT: u32 = 3;

/// Largest supported spread.
pub const MAX_PULL_COUNT: u32 = 20;

/// Default storage key for the session snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "tarot_session";

/// Configuration for a [`SessionMachine`](crate::session::SessionMachine).
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use tarot_deck::core::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_default_pull_count(5)
///     .with_shuffle_delay(Duration::from_millis(500))
///     .with_default_deck("thoth");
///
/// assert!(config.validate().is_ok());
/// assert!(config.accepts_pull_count(20));
/// assert!(!config.accepts_pull_count(21));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Pull count used on a fresh start and after a rejected snapshot.
    pub default_pull_count: u32,

    /// Upper bound for `select_count`. At most [`MAX_PULL_COUNT`].
    pub max_pull_count: u32,

    /// Time box for the shuffle animation before the grid opens.
    #[serde(with = "duration_millis")]
    pub shuffle_delay: Duration,

    /// Key the snapshot is stored under.
    pub storage_key: String,

    /// Deck preselected on a fresh start. `None` uses the first catalog entry.
    pub default_deck: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_pull_count: DEFAULT_PULL_COUNT,
            max_pull_count: MAX_PULL_COUNT,
            shuffle_delay: Duration::from_millis(1400),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_deck: None,
        }
    }
}

impl SessionConfig {
    /// Set the default pull count.
    #[must_use]
    pub fn with_default_pull_count(mut self, count: u32) -> Self {
        self.default_pull_count = count;
        self
    }

    /// Set the largest allowed pull count.
    #[must_use]
    pub fn with_max_pull_count(mut self, count: u32) -> Self {
        self.max_pull_count = count;
        self
    }

    /// Set the shuffle animation time box.
    #[must_use]
    pub fn with_shuffle_delay(mut self, delay: Duration) -> Self {
        self.shuffle_delay = delay;
        self
    }

    /// Set the snapshot storage key.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Preselect a deck on fresh start.
    #[must_use]
    pub fn with_default_deck(mut self, deck_id: impl Into<String>) -> Self {
        self.default_deck = Some(deck_id.into());
        self
    }

    /// Check that a pull count is within `1..=max_pull_count`.
    #[must_use]
    pub fn accepts_pull_count(&self, count: u32) -> bool {
        (1..=self.max_pull_count).contains(&count)
    }

    /// Reject inconsistent settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_pull_count == 0 {
            return Err(TarotError::Config("max pull count must be positive".into()));
        }
        if self.max_pull_count > MAX_PULL_COUNT {
            return Err(TarotError::Config(format!(
                "max pull count {} exceeds {}",
                self.max_pull_count, MAX_PULL_COUNT
            )));
        }
        if !self.accepts_pull_count(self.default_pull_count) {
            return Err(TarotError::Config(format!(
                "default pull count {} outside 1..={}",
                self.default_pull_count, self.max_pull_count
            )));
        }
        if self.storage_key.is_empty() {
            return Err(TarotError::Config("storage key must not be empty".into()));
        }
        Ok(())
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.default_pull_count, 3);
        assert_eq!(config.max_pull_count, 20);
        assert_eq!(config.shuffle_delay, Duration::from_millis(1400));
        assert_eq!(config.storage_key, "tarot_session");
        assert!(config.default_deck.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pull_count_bounds() {
        let config = SessionConfig::default();
        assert!(!config.accepts_pull_count(0));
        assert!(config.accepts_pull_count(1));
        assert!(config.accepts_pull_count(20));
        assert!(!config.accepts_pull_count(21));
    }

    #[test]
    fn test_validate_rejects_bad_default() {
        let config = SessionConfig::default().with_default_pull_count(0);
        assert!(matches!(config.validate(), Err(TarotError::Config(_))));

        let config = SessionConfig::default()
            .with_max_pull_count(2)
            .with_default_pull_count(3);
        assert!(config.validate().is_err());

        let config = SessionConfig::default().with_storage_key("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_caps_max_pull_count() {
        let config = SessionConfig::default().with_max_pull_count(MAX_PULL_COUNT);
        assert!(config.validate().is_ok());

        // a pull larger than the deck could never fill the grid
        let config = SessionConfig::default().with_max_pull_count(100);
        assert!(matches!(config.validate(), Err(TarotError::Config(_))));

        let config = SessionConfig::default().with_max_pull_count(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"shuffleDelay": 250, "defaultDeck": "marseille"}"#).unwrap();

        assert_eq!(config.shuffle_delay, Duration::from_millis(250));
        assert_eq!(config.default_deck.as_deref(), Some("marseille"));
        assert_eq!(config.default_pull_count, DEFAULT_PULL_COUNT);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = SessionConfig::default()
            .with_default_pull_count(7)
            .with_storage_key("other");

        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
