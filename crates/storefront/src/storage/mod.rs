//! Key-value storage backends for persisted storefront state.
//!
//! # Backends
//!
//! - [`FileStorage`] - One JSON file per key in a directory (the default)
//! - [`MemoryStorage`] - In-process map with an optional byte quota
//!
//! The cart only ever reads and writes whole string values under a fixed key,
//! the same contract a browser's local storage offers. Encoding and the key
//! itself are owned by [`crate::cart::CartRepository`].

use std::fmt::Debug;
use std::sync::Arc;

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors returned by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The write would exceed the backend's byte quota.
    #[error("storage quota exceeded: need {needed} bytes, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Backend is unusable (e.g. a poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store.
///
/// Methods take `&self`; implementations use interior mutability where needed.
pub trait KeyValueStorage: Send + Sync + Debug {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Shared, type-erased storage handle used by the application state.
pub type SharedStorage = Arc<dyn KeyValueStorage>;

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}
