//! redb-backed [`KeyValueStore`].

use super::KeyValueStore;
use super::error::StorageError;
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;

/// Snapshot table: &str → encoded bytes
const SNAPSHOT_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("snapshots");

/// Stores snapshots in a single redb table.
pub struct RedbStore {
    db: redb::Database,
}

impl RedbStore {
    /// Creates or opens the database file, creating parent directories as needed.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = redb::Database::create(path)?;

        // Initialize tables
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SNAPSHOT_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOT_TABLE)?;

        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SNAPSHOT_TABLE)?;
            table.insert(key, bytes)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
