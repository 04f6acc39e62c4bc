pub mod add;
pub mod adjust;
pub mod completions;
pub mod list;
pub mod remove;

use crate::output::{CliError, OutputMode, render_error};
use std::path::PathBuf;
use stockpile_core::config::Config;
use stockpile_core::error::ErrorCode;
use stockpile_core::persist::{FileKvStore, Gateway};
use stockpile_core::session::{LogNotifier, Session};

/// Session type used by one-shot commands.
pub type CliSession = Session<FileKvStore, LogNotifier>;

/// Resolved storage location and settings shared by every command.
#[derive(Debug, Clone)]
pub struct StoreContext {
    pub config: Config,
    pub data_dir: PathBuf,
}

impl StoreContext {
    pub fn kv(&self) -> FileKvStore {
        FileKvStore::new(&self.data_dir)
            .with_lock_timeout(self.config.storage.lock_timeout())
            .durable(self.config.storage.durable)
    }

    pub fn gateway(&self) -> Gateway<FileKvStore> {
        Gateway::with_key(self.kv(), self.config.storage.key.clone())
    }

    /// Open a session for a one-shot command.
    pub fn open_session(&self) -> CliSession {
        Session::open(self.gateway(), LogNotifier)
    }
}

/// Fail the command if the last mutation did not reach disk.
pub fn ensure_persisted(session: &CliSession, output: OutputMode) -> anyhow::Result<()> {
    if session.is_persisted() {
        return Ok(());
    }
    let code = ErrorCode::StorageWriteFailed;
    let msg = format!(
        "{} for key '{}'",
        code.message(),
        session.gateway().key()
    );
    render_error(output, &CliError::from_code(code, &msg))?;
    anyhow::bail!("{msg}");
}

/// Report a name that matched no item and fail the command.
pub fn item_not_found(name: &str, output: OutputMode) -> anyhow::Result<()> {
    let msg = format!("item '{name}' not found");
    render_error(output, &CliError::from_code(ErrorCode::ItemNotFound, &msg))?;
    anyhow::bail!("{msg}");
}
