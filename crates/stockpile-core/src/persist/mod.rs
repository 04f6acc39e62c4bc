//! Persistence gateway: the item list as one JSON blob under one key.
//!
//! Storage backends only need a byte-level `get`/`set` contract
//! ([`KvStore`]). The [`Gateway`] owns encoding and the best-effort policy:
//! read failures degrade to an empty list, write failures are logged and
//! dropped. The in-memory store is never rolled back.

mod file;
mod memory;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;

use crate::error::ErrorCode;
use crate::lock::LockError;
use crate::model::Item;
use std::path::PathBuf;

/// Key the item list is stored under unless configured otherwise.
pub const DEFAULT_KEY: &str = "items";

/// Errors from a key-value backend.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    /// File I/O error.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Lock acquisition failed.
    #[error("lock error: {0}")]
    Lock(#[from] LockError),

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl KvError {
    #[must_use]
    pub const fn code(&self, writing: bool) -> ErrorCode {
        match self {
            Self::Lock(err) => err.code(),
            Self::InvalidKey(_) => ErrorCode::InvalidStorageKey,
            Self::Io { .. } | Self::Unavailable(_) if writing => ErrorCode::StorageWriteFailed,
            Self::Io { .. } | Self::Unavailable(_) => ErrorCode::StorageReadFailed,
        }
    }
}

/// Byte-level key-value contract the gateway needs from storage.
pub trait KvStore {
    /// Read the bytes stored under `key`, `None` if the key was never set.
    ///
    /// # Errors
    ///
    /// Returns a [`KvError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError>;

    /// Overwrite `key` with `bytes`.
    ///
    /// # Errors
    ///
    /// Returns a [`KvError`] if the value could not be stored.
    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), KvError>;
}

impl<K: KvStore + ?Sized> KvStore for &K {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), KvError> {
        (**self).set(key, bytes)
    }
}

/// Errors from loading or saving the item list.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to read item list: {0}")]
    Read(#[source] KvError),

    #[error("failed to write item list: {0}")]
    Write(#[source] KvError),

    #[error("stored item list is not a valid [{{name, inventory}}] array: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode item list: {0}")]
    Encode(#[source] serde_json::Error),
}

impl PersistError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read(err) => err.code(false),
            Self::Write(err) => err.code(true),
            Self::Decode(_) => ErrorCode::CorruptBlob,
            Self::Encode(_) => ErrorCode::InternalUnexpected,
        }
    }
}

/// Load/save the item list through a [`KvStore`] under a fixed key.
#[derive(Debug, Clone)]
pub struct Gateway<K> {
    kv: K,
    key: String,
}

impl<K: KvStore> Gateway<K> {
    /// Gateway over `kv` using [`DEFAULT_KEY`].
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, DEFAULT_KEY)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and decode the stored list. A missing key is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Read`] when the backend fails and
    /// [`PersistError::Decode`] when the blob has the wrong shape.
    pub fn try_load(&self) -> Result<Vec<Item>, PersistError> {
        let Some(bytes) = self.kv.get(&self.key).map_err(PersistError::Read)? else {
            return Ok(Vec::new());
        };
        serde_json::from_slice(&bytes).map_err(PersistError::Decode)
    }

    /// Encode and store the full list, overwriting any prior value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Encode`] or [`PersistError::Write`].
    pub fn try_save(&self, items: &[Item]) -> Result<(), PersistError> {
        let bytes = serde_json::to_vec(items).map_err(PersistError::Encode)?;
        self.kv.set(&self.key, &bytes).map_err(PersistError::Write)
    }

    /// Best-effort load: any failure is logged and yields an empty list.
    pub fn load(&self) -> Vec<Item> {
        match self.try_load() {
            Ok(items) => {
                tracing::debug!(key = %self.key, count = items.len(), "loaded item list");
                items
            }
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    code = %err.code(),
                    "starting with an empty item list: {err}"
                );
                Vec::new()
            }
        }
    }

    /// Best-effort save: failures are logged and abandoned, never retried.
    ///
    /// Returns whether the write landed.
    pub fn save(&self, items: &[Item]) -> bool {
        match self.try_save(items) {
            Ok(()) => {
                tracing::debug!(key = %self.key, count = items.len(), "saved item list");
                true
            }
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    code = %err.code(),
                    "item list not persisted (in-memory state kept): {err}"
                );
                false
            }
        }
    }
}
