//! Snapshot storage port: durable key-value persistence for cart state.
//!
//! The cart store writes one full serialized snapshot per mutation and reads
//! it back once when opening. [`FileSnapshotStore`] persists snapshots as
//! files; [`InMemorySnapshotStore`] backs tests and ephemeral use.

pub mod file;
pub mod memory;

pub use file::FileSnapshotStore;
pub use memory::InMemorySnapshotStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur reading or writing snapshots.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable key-value storage for serialized cart snapshots.
///
/// `set` must be atomic per key: a reader never observes a half-written
/// value.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the value exists but cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written durably.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
