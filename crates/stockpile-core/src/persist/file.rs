//! Directory-backed key-value store.
//!
//! Layout under the root directory:
//!
//! - `<key>.json` holds the value for `key`.
//! - `<key>.json.tmp` is the staging file for an in-flight write.
//! - `.lock` is the advisory lock taken for the duration of a write.
//!
//! Writes stage the full value and rename it over the target, so readers
//! see either the old or the new value, never a torn one.

use super::{KvError, KvStore};
use crate::lock::StoreLock;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const LOCK_FILE: &str = ".lock";

/// Key-value store mapping each key to one file in `root`.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    root: PathBuf,
    lock_timeout: Duration,
    durable: bool,
}

impl FileKvStore {
    /// Store rooted at `root` with a 2s lock timeout and no fsync.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lock_timeout: Duration::from_secs(2),
            durable: false,
        }
    }

    #[must_use]
    pub const fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Fsync staged data before the rename.
    #[must_use]
    pub const fn durable(mut self, durable: bool) -> Self {
        self.durable = durable;
        self
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::InvalidKey`] for keys that are empty, start with a
    /// dot, or contain anything besides ASCII letters, digits, `-`, `_`, `.`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, KvError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    fn io_err(path: &Path) -> impl FnOnce(io::Error) -> KvError + '_ {
        move |source| KvError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn validate_key(key: &str) -> Result<(), KvError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(KvError::InvalidKey(key.to_string()))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::io_err(&path)(err)),
        }
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(Self::io_err(&self.root))?;

        let _lock = StoreLock::acquire(&self.lock_path(), self.lock_timeout)?;

        let tmp = path.with_extension("json.tmp");
        let mut file = File::create(&tmp).map_err(Self::io_err(&tmp))?;
        file.write_all(bytes).map_err(Self::io_err(&tmp))?;
        file.flush().map_err(Self::io_err(&tmp))?;
        if self.durable {
            file.sync_data().map_err(Self::io_err(&tmp))?;
        }
        drop(file);

        fs::rename(&tmp, &path).map_err(Self::io_err(&path))?;
        tracing::trace!(path = %path.display(), bytes = bytes.len(), "replaced blob");
        Ok(())
    }
}
