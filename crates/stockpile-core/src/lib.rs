//! stockpile-core library.
//!
//! Holds the item list, the derived display rows, and the key-value
//! persistence that survives restarts. Front ends drive a [`Session`] with
//! [`Intent`] values and render its rows.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums at module seams, `anyhow::Result` in config and binaries.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod lock;
pub mod model;
pub mod persist;
pub mod session;
pub mod store;
pub mod view;

pub use model::{Item, SortMode};
pub use session::{Intent, Notifier, Session};
pub use store::ItemStore;
pub use view::{DisplayRow, project};
