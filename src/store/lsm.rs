use std::path::Path;

use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use log::debug;

use super::{ReadBack, SyncStore};
use crate::error::StoreError;

const PARTITION: &str = "puts";

/// An fjall keyspace with a single partition.
///
/// fjall journals every insert; durability comes from persisting the journal
/// with [`PersistMode::SyncAll`] before `put_durable` returns.
pub struct FjallStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl FjallStore {
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        debug!("opening fjall keyspace at {}", root.display());
        let keyspace = Config::new(root).open()?;
        let partition = keyspace.open_partition(PARTITION, PartitionCreateOptions::default())?;
        Ok(Self { keyspace, partition })
    }
}

impl SyncStore for FjallStore {
    fn put_durable(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.partition.insert(key, value)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}

impl ReadBack for FjallStore {
    fn entry_count(&self) -> Result<usize, StoreError> {
        Ok(self.partition.len()?)
    }

    fn value_len(&self, key: &[u8]) -> Result<Option<usize>, StoreError> {
        Ok(self.partition.get(key)?.map(|v| v.len()))
    }
}
