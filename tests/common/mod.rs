//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use syncput_benchmarks::error::StoreError;
use syncput_benchmarks::{RunProfile, SyncStore};

// =============================================================================
// Directory trees
// =============================================================================

/// Builds a tree `depth` levels deep under `root`, with `fanout`
/// subdirectories and two files per directory. Returns how many entries
/// (files and directories, including `root`) it created.
pub fn build_tree(root: &Path, depth: usize, fanout: usize) -> usize {
    fs::create_dir_all(root).unwrap();
    let mut created = 1;
    for i in 0..2 {
        fs::write(root.join(format!("{i:06}.sst")), vec![b'x'; 64]).unwrap();
        created += 1;
    }
    if depth > 0 {
        for i in 0..fanout {
            created += build_tree(&root.join(format!("level{depth}-{i}")), depth - 1, fanout);
        }
    }
    created
}

/// Every path under `root`, without following links.
pub fn walk(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for entry in fs::read_dir(root).unwrap() {
        let path = entry.unwrap().path();
        let meta = fs::symlink_metadata(&path).unwrap();
        if meta.is_dir() {
            out.extend(walk(&path));
        }
        out.push(path);
    }
    out
}

// =============================================================================
// Profiles and stores
// =============================================================================

pub fn profile_in(dir: &Path, cleanup_after: bool) -> RunProfile {
    RunProfile {
        db_path: dir.join("syncput.db"),
        cleanup_after,
    }
}

/// Accepts puts until `fail_at` puts have succeeded, then fails every put.
pub struct FailingStore {
    pub written: Vec<(String, usize)>,
    pub fail_at: usize,
}

impl FailingStore {
    pub fn new(fail_at: usize) -> Self {
        Self {
            written: Vec::new(),
            fail_at,
        }
    }
}

impl SyncStore for FailingStore {
    fn put_durable(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        if self.written.len() == self.fail_at {
            return Err(std::io::Error::other("disk on fire").into());
        }
        self.written
            .push((String::from_utf8(key.to_vec()).unwrap(), value.len()));
        Ok(())
    }
}
