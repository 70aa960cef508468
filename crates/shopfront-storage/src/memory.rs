//! In-memory storage backend for tests and embedding.

use crate::{DurableStore, StorageError};
use parking_lot::Mutex;
use std::collections::HashMap;

/// A `DurableStore` that keeps blobs in a process-local map.
///
/// Nothing survives a restart; useful for tests and for embedders that
/// manage persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_raw(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get_raw("k").unwrap(), None);
        store.set_raw("k", "v").unwrap();
        assert_eq!(store.get_raw("k").unwrap().as_deref(), Some("v"));
        store.remove_raw("k").unwrap();
        assert_eq!(store.get_raw("k").unwrap(), None);
        // Removing an absent key is a no-op.
        store.remove_raw("k").unwrap();
    }
}
