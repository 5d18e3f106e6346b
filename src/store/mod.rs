//! Storage backends under test.
//!
//! The benchmark loop only needs a durable put. Anything that can report what
//! it holds also implements [`ReadBack`], which the tests use to check that a
//! run wrote exactly what it claims.

mod btree;
mod file;
mod lsm;

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{StoreError, UsageError};

pub use btree::RedbStore;
pub use file::{PreallocatedFileStore, RawFileStore};
pub use lsm::FjallStore;

/// A store whose puts are on stable storage by the time they return.
pub trait SyncStore {
    fn put_durable(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// The up-front allocation done at open, for backends that size their
    /// file before the first put.
    fn preallocation(&self) -> Option<Preallocation> {
        None
    }
}

/// An extension of the data file to its final size, synced once at open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preallocation {
    pub bytes: u64,
    pub sync: Duration,
}

impl Display for Preallocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "takes {:?} sync {} bytes lseek file", self.sync, self.bytes)
    }
}

/// Inspection of a store's contents after a run.
pub trait ReadBack {
    fn entry_count(&self) -> Result<usize, StoreError>;

    /// Length of the value stored under `key`, if any.
    fn value_len(&self, key: &[u8]) -> Result<Option<usize>, StoreError>;
}

/// Expected volume of a run, used by backends that size their files upfront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizing {
    pub count: u64,
    pub unit: usize,
}

impl Sizing {
    /// Bytes needed for `count` records of `unit` bytes plus a decimal key.
    pub fn total_bytes(&self) -> u64 {
        let key_len = self.count.to_string().len() as u64;
        self.count.saturating_mul(self.unit as u64 + key_len)
    }
}

/// A backend selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Append to a plain file, `fsync` after every record.
    Raw,
    /// Write into a preallocated file, `fdatasync` after every record.
    Fdatasync,
    /// fjall LSM keyspace, journal persisted with `SyncAll` after every put.
    Fjall,
    /// redb B-tree, one `Durability::Immediate` transaction per put.
    Redb,
}

impl Target {
    pub const ALL: [Target; 4] = [Target::Raw, Target::Fdatasync, Target::Fjall, Target::Redb];

    pub fn label(self) -> &'static str {
        match self {
            Target::Raw => "raw",
            Target::Fdatasync => "fdatasync",
            Target::Fjall => "fjall",
            Target::Redb => "redb",
        }
    }

    /// Heading printed before a target's results.
    pub fn banner(self) -> &'static str {
        match self {
            Target::Raw => "for direct append+sync:",
            Target::Fdatasync => "preallocated file append+fdatasync:",
            Target::Fjall => "for fjall:",
            Target::Redb => "for redb:",
        }
    }

    /// Directory a target's data lives in for a comparison run.
    pub fn scratch_dir(self) -> PathBuf {
        std::env::temp_dir().join(format!("syncput-{}", self.label()))
    }

    /// Opens the backend rooted at `root`, creating it if missing.
    pub fn open(self, root: &Path, sizing: Sizing) -> Result<Box<dyn SyncStore>, StoreError> {
        Ok(match self {
            Target::Raw => Box::new(RawFileStore::open(root)?),
            Target::Fdatasync => Box::new(PreallocatedFileStore::open(root, sizing.total_bytes())?),
            Target::Fjall => Box::new(FjallStore::open(root)?),
            Target::Redb => Box::new(RedbStore::open(root)?),
        })
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Target {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| UsageError::InvalidTarget(s.to_string()))
    }
}
