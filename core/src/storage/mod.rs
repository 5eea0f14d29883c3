//! Key-value persistence port for serialized indices.
//!
//! The engine only needs `get`/`put` of opaque bytes. [`MemoryStore`] keeps
//! them in a map, [`RedbStore`] in a redb database file. Callers must
//! treat any failure here as a cache miss, never as fatal.

use error::StorageError;
use std::collections::HashMap;

mod cache;
mod db;

pub use cache::IndexCache;
pub use db::RedbStore;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum StorageError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        /// For adapters outside this crate whose backend cannot serve a
        /// request, such as a closed connection or a full quota.
        #[error("Store unavailable: {0}")]
        Unavailable(String),
    }
}

/// Opaque byte storage addressed by string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// In-process store, lost on drop.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
