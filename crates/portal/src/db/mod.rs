//! Persistence for the portal.
//!
//! # Layout
//!
//! Persisted state is a set of named string blobs in a key-value [`Storage`]
//! backend. The portal uses a single key (`fleetUser` by default) holding the
//! JSON array of user records:
//!
//! - [`FileStorage`] - one `{key}.json` file per key under a data directory
//! - [`MemoryStorage`] - process-local map, used by tests and demos
//!
//! [`users::UserRepository`] layers the record collection on top of a backend.

pub mod storage;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::PortalConfig;

pub use storage::{FileStorage, MemoryStorage};

/// Errors raised by storage backends and repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Records could not be serialized for writing.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key contains characters that are not allowed.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A key-value store of string blobs.
///
/// Writes replace the previous value wholesale; there is no merge.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
}

/// Whether `key` is usable as a storage key.
///
/// Keys become file names, so only ASCII letters, digits, `-` and `_` are allowed.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Reject keys that [`is_valid_key`] does not accept.
pub(crate) fn check_key(key: &str) -> Result<(), RepositoryError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(RepositoryError::InvalidKey(key.to_string()))
    }
}

/// Create the file-backed storage described by the configuration.
#[must_use]
pub fn create_storage(config: &PortalConfig) -> Arc<dyn Storage> {
    Arc::new(FileStorage::new(config.data_dir.clone()))
}
