//! `HashMap`-backed key-value store for tests and embedding.

use super::{KvError, KvStore};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory key-value store. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryKvStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently holding a value, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .storage
            .read()
            .map(|storage| storage.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        Ok(self
            .storage
            .read()
            .map_err(|_| KvError::Unavailable("lock poisoned".into()))?
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), KvError> {
        self.storage
            .write()
            .map_err(|_| KvError::Unavailable("lock poisoned".into()))?
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_returns_none() {
        let kv = MemoryKvStore::new();
        assert!(kv.get("items").unwrap().is_none());
    }

    #[test]
    fn set_overwrites() {
        let kv = MemoryKvStore::new();
        kv.set("items", b"[]").unwrap();
        kv.set("items", b"[1]").unwrap();
        assert_eq!(kv.get("items").unwrap().as_deref(), Some(&b"[1]"[..]));
        assert_eq!(kv.keys(), ["items"]);
    }

    #[test]
    fn clone_shares_storage() {
        let kv = MemoryKvStore::new();
        let clone = kv.clone();
        kv.set("items", b"[]").unwrap();
        assert!(clone.get("items").unwrap().is_some());
    }
}
