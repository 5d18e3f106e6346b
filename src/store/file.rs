use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use std::time::Instant;

use log::info;

use super::{Preallocation, SyncStore};
use crate::error::StoreError;

const RAW_FILE: &str = "raw.log";
const PREALLOCATED_FILE: &str = "preallocated.log";

/// Plain append-only file. A record is the key bytes followed by the value
/// bytes, with no framing; the file is `fsync`ed after every record.
pub struct RawFileStore {
    file: File,
}

impl RawFileStore {
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(root)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(root.join(RAW_FILE))?;
        Ok(Self { file })
    }
}

impl SyncStore for RawFileStore {
    fn put_durable(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.file.write_all(key)?;
        self.file.write_all(value)?;
        self.file.sync_all()?;
        Ok(())
    }
}

/// A file extended to its final size before the run, then overwritten from
/// the start. Only data is flushed per record (`fdatasync`), since the file
/// size no longer changes.
pub struct PreallocatedFileStore {
    file: File,
    preallocation: Preallocation,
}

impl PreallocatedFileStore {
    /// Creates the file with `len` bytes of room and syncs it once.
    pub fn open(root: &Path, len: u64) -> Result<Self, StoreError> {
        fs::create_dir_all(root)?;
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(root.join(PREALLOCATED_FILE))?;

        file.seek(SeekFrom::Start(len))?;
        file.write_all(b"1")?;
        let start = Instant::now();
        file.sync_all()?;
        let preallocation = Preallocation {
            bytes: len,
            sync: start.elapsed(),
        };
        info!("syncing {len} preallocated bytes took {:?}", preallocation.sync);
        file.seek(SeekFrom::Start(0))?;

        Ok(Self { file, preallocation })
    }
}

impl SyncStore for PreallocatedFileStore {
    fn put_durable(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.file.write_all(key)?;
        self.file.write_all(value)?;
        self.file.sync_data()?;
        Ok(())
    }

    fn preallocation(&self) -> Option<Preallocation> {
        Some(self.preallocation)
    }
}
