//! Shopfront Storage - durable client-local persistence.
//!
//! The storefront persists exactly two independently-keyed JSON blobs:
//! the `session` slot and the `cart` slot, each the direct serialization
//! of its data-model shape. Restoration at process start is best-effort:
//! absent or malformed data yields nothing, never a startup error.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{de::DeserializeOwned, Serialize};

/// The two durable slots the storefront owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The authenticated session snapshot.
    Session,
    /// The shopping cart snapshot.
    Cart,
}

impl Slot {
    /// Stable storage key for this slot.
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Session => "session",
            Slot::Cart => "cart",
        }
    }
}

/// Raw string-keyed durable storage.
///
/// Implementations only move opaque strings; serialization lives in the
/// generic helpers below so every backend stores the same layout.
pub trait DurableStore: Send + Sync {
    /// Read the raw blob under `key`, if any.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the raw blob under `key`, replacing any previous value.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the blob under `key`. Absent keys are a no-op.
    fn remove_raw(&self, key: &str) -> Result<(), StorageError>;
}

/// Serialize `value` and write it to `slot`.
pub fn persist<T: Serialize>(
    store: &dyn DurableStore,
    slot: Slot,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    store.set_raw(slot.key(), &json)
}

/// Read and deserialize `slot`, best-effort.
///
/// Absent data returns `None`. Malformed data also returns `None` (logged
/// at debug) so a corrupt blob can never prevent startup.
pub fn restore<T: DeserializeOwned>(store: &dyn DurableStore, slot: Slot) -> Option<T> {
    let raw = match store.get_raw(slot.key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::debug!(slot = slot.key(), error = %e, "failed to read durable slot");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(slot = slot.key(), error = %e, "malformed durable slot ignored");
            None
        }
    }
}

/// Remove whatever is stored in `slot`.
pub fn clear(store: &dyn DurableStore, slot: Slot) -> Result<(), StorageError> {
    store.remove_raw(slot.key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        items: Vec<String>,
        total: i64,
    }

    #[test]
    fn test_persist_restore_roundtrip() {
        let store = MemoryStore::new();
        let value = Snapshot {
            items: vec!["a".to_string(), "b".to_string()],
            total: 42,
        };
        persist(&store, Slot::Cart, &value).unwrap();
        let back: Snapshot = restore(&store, Slot::Cart).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_restore_absent_is_none() {
        let store = MemoryStore::new();
        assert_eq!(restore::<Snapshot>(&store, Slot::Session), None);
    }

    #[test]
    fn test_restore_malformed_is_none() {
        let store = MemoryStore::new();
        store.set_raw(Slot::Cart.key(), "{not json").unwrap();
        assert_eq!(restore::<Snapshot>(&store, Slot::Cart), None);
    }

    #[test]
    fn test_clear_slot() {
        let store = MemoryStore::new();
        persist(&store, Slot::Session, &1i64).unwrap();
        clear(&store, Slot::Session).unwrap();
        assert_eq!(restore::<i64>(&store, Slot::Session), None);
    }

    #[test]
    fn test_slots_are_independent() {
        let store = MemoryStore::new();
        persist(&store, Slot::Session, &"s".to_string()).unwrap();
        persist(&store, Slot::Cart, &"c".to_string()).unwrap();
        clear(&store, Slot::Session).unwrap();
        assert_eq!(restore::<String>(&store, Slot::Cart).as_deref(), Some("c"));
    }
}
