//! Persistence adapter.
//!
//! Snapshots are stored as one string value under one key of a
//! string-to-string store. The value is the JSON snapshot encoded as
//! standard base64.
//!
//! ## Layers
//!
//! - `KeyValueStore`: the backend seam (`MemoryStore`, `FileStore`)
//! - `encode` / `decode`: snapshot codec
//! - `SnapshotStore`: backend plus key, with best-effort save and load

mod file;

pub use file::FileStore;

use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rustc_hash::FxHashMap;

use crate::core::config::DEFAULT_STORAGE_KEY;
use crate::core::error::{Result, TarotError};
use crate::session::Snapshot;

/// String key-value backend.
pub trait KeyValueStore {
    /// Value under `key`, or `None` if nothing was ever stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-process store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<FxHashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().map_err(TarotError::persistence)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let mut values = self.values.lock().map_err(TarotError::persistence)?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Encode a snapshot as base64 JSON.
pub fn encode(snapshot: &Snapshot) -> Result<String> {
    let json = serde_json::to_vec(snapshot).map_err(TarotError::persistence)?;
    Ok(STANDARD.encode(json))
}

/// Decode a base64 JSON snapshot.
///
/// Any failure, whether base64, UTF-8 or JSON shape, is `MalformedSnapshot`.
pub fn decode(value: &str) -> Result<Snapshot> {
    let bytes = STANDARD
        .decode(value.trim())
        .map_err(|e| TarotError::malformed(format!("base64: {}", e)))?;
    serde_json::from_slice(&bytes).map_err(|e| TarotError::malformed(format!("json: {}", e)))
}

/// Snapshot persistence over a key-value backend.
///
/// `save_snapshot` and `load_snapshot` never fail: errors are logged and dropped so a broken
/// store cannot block a reading. `try_save` and `try_load` report them.
pub struct SnapshotStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl SnapshotStore {
    pub fn new(backend: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            backend: Box::new(backend),
            key: key.into(),
        }
    }

    /// In-memory store under the default key.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), DEFAULT_STORAGE_KEY)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load and decode the stored snapshot.
    ///
    /// `Ok(None)` when nothing is stored.
    pub fn try_load(&self) -> Result<Option<Snapshot>> {
        match self.backend.get(&self.key)? {
            Some(value) => decode(&value).map(Some),
            None => Ok(None),
        }
    }

    /// Encode and store a snapshot.
    pub fn try_save(&self, snapshot: &Snapshot) -> Result<()> {
        let value = encode(snapshot)?;
        self.backend.set(&self.key, value)
    }

    /// Stored snapshot, or `None` when absent or unreadable.
    #[must_use]
    pub fn load_snapshot(&self) -> Option<Snapshot> {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "discarding stored snapshot");
                None
            }
        }
    }

    /// Store a snapshot, logging any failure.
    pub fn save_snapshot(&self, snapshot: &Snapshot) {
        if let Err(err) = self.try_save(snapshot) {
            tracing::warn!(key = %self.key, error = %err, "snapshot not saved");
        }
    }
}

impl std::fmt::Debug for SnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotStore").field("key", &self.key).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SnapshotCard;
    use crate::cards::ArcanaKind;

    fn sample() -> Snapshot {
        Snapshot {
            deck_id: "standard".into(),
            pull_count: 1,
            drawn_cards: vec![SnapshotCard {
                name: "The Tower".into(),
                kind: ArcanaKind::Major,
                major_number: Some(16),
                suit: None,
                image_ref: None,
                reversed: true,
                origin_grid_slot: 9,
            }],
            view_cursor: 0,
            timestamp: 42,
        }
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(TarotError::persistence("unavailable"))
        }

        fn set(&self, _key: &str, _value: String) -> Result<()> {
            Err(TarotError::persistence("quota exceeded"))
        }
    }

    #[test]
    fn test_encoded_value_is_base64_json() {
        let value = encode(&sample()).unwrap();
        let json = STANDARD.decode(&value).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();

        assert_eq!(parsed["deckId"], "standard");
        assert_eq!(parsed["drawnCards"][0]["majorNumber"], 16);
        assert_eq!(decode(&value).unwrap(), sample());
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode("!!not base64!!"), Err(TarotError::MalformedSnapshot(_))));

        let not_json = STANDARD.encode("hello");
        assert!(matches!(decode(&not_json), Err(TarotError::MalformedSnapshot(_))));

        let wrong_shape = STANDARD.encode(r#"{"deck": 1}"#);
        assert!(matches!(decode(&wrong_shape), Err(TarotError::MalformedSnapshot(_))));
    }

    #[test]
    fn test_memory_store_shared_between_clones() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v".into()).unwrap();

        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(other.get("missing").unwrap(), None);
    }

    #[test]
    fn test_snapshot_store_uses_key() {
        let backend = MemoryStore::new();
        let store = SnapshotStore::new(backend.clone(), "tarot_session");
        store.save_snapshot(&sample());

        let raw = backend.get("tarot_session").unwrap().unwrap();
        assert_eq!(decode(&raw).unwrap(), sample());
        assert_eq!(store.load_snapshot(), Some(sample()));
    }

    #[test]
    fn test_empty_store_loads_nothing() {
        assert_eq!(SnapshotStore::in_memory().load_snapshot(), None);
        assert_eq!(SnapshotStore::in_memory().try_load().unwrap(), None);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let store = SnapshotStore::new(FailingStore, "tarot_session");
        store.save_snapshot(&sample());
        assert_eq!(store.load_snapshot(), None);

        assert!(matches!(store.try_save(&sample()), Err(TarotError::PersistenceFailure(_))));
        assert!(matches!(store.try_load(), Err(TarotError::PersistenceFailure(_))));
    }

    #[test]
    fn test_unreadable_value_loads_nothing() {
        let backend = MemoryStore::new();
        backend.set("tarot_session", "%%%".into()).unwrap();
        let store = SnapshotStore::new(backend, "tarot_session");

        assert_eq!(store.load_snapshot(), None);
        assert!(matches!(store.try_load(), Err(TarotError::MalformedSnapshot(_))));
    }
}
