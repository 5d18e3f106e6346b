use std::fs;
use std::path::Path;

use log::debug;
use redb::{Database, Durability, ReadableTable, ReadableTableMetadata, TableDefinition};

use super::{ReadBack, SyncStore};
use crate::error::StoreError;

const FILE_NAME: &str = "data.redb";
const PUTS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("puts");

fn redb_err(e: impl Into<redb::Error>) -> StoreError {
    StoreError::Redb(e.into())
}

/// A redb database file inside the store directory.
///
/// Each put is its own write transaction committed with
/// [`Durability::Immediate`].
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(root)?;
        let path = root.join(FILE_NAME);
        debug!("opening redb database at {}", path.display());
        let db = Database::create(path).map_err(redb_err)?;

        // Create the table up front so read transactions on an empty store succeed.
        let txn = db.begin_write().map_err(redb_err)?;
        txn.open_table(PUTS).map_err(redb_err)?;
        txn.commit().map_err(redb_err)?;

        Ok(Self { db })
    }
}

impl SyncStore for RedbStore {
    fn put_durable(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let mut txn = self.db.begin_write().map_err(redb_err)?;
        txn.set_durability(Durability::Immediate);
        {
            let mut table = txn.open_table(PUTS).map_err(redb_err)?;
            table.insert(key, value).map_err(redb_err)?;
        }
        txn.commit().map_err(redb_err)
    }
}

impl ReadBack for RedbStore {
    fn entry_count(&self) -> Result<usize, StoreError> {
        let txn = self.db.begin_read().map_err(redb_err)?;
        let table = txn.open_table(PUTS).map_err(redb_err)?;
        Ok(table.len().map_err(redb_err)? as usize)
    }

    fn value_len(&self, key: &[u8]) -> Result<Option<usize>, StoreError> {
        let txn = self.db.begin_read().map_err(redb_err)?;
        let table = txn.open_table(PUTS).map_err(redb_err)?;
        let value = table.get(key).map_err(redb_err)?;
        Ok(value.map(|v| v.value().len()))
    }
}
