//! Recursive removal of a database directory.
//!
//! The walk is depth-first post-order: a directory is removed only after
//! everything inside it. Symbolic links are never followed (a link is removed
//! as a link), directories on another device than the root are not entered,
//! and all paths are built from the root so the working directory is never
//! changed.

use std::fs::{self, Metadata};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

/// Some entries under `root` could not be removed.
///
/// Each failure was logged as it happened; this only carries the totals.
#[derive(Debug, Error)]
#[error("{errors} error(s) while removing {} ({removed} entries removed)", root.display())]
pub struct RemoveTreeError {
    pub root: PathBuf,
    pub errors: usize,
    pub removed: usize,
}

/// Removes `root` and everything below it, returning the number of entries
/// removed.
///
/// A failure on one entry does not stop the walk; siblings are still
/// visited and the error is reported once the walk is complete.
pub fn remove_tree(root: impl AsRef<Path>) -> Result<usize, RemoveTreeError> {
    TreeRemover::new(UnixDevices).run(root.as_ref())
}

/// Device id of a filesystem entry, from its `lstat` metadata.
pub(crate) trait DeviceLookup {
    fn device(&self, path: &Path, meta: &Metadata) -> u64;
}

struct UnixDevices;

impl DeviceLookup for UnixDevices {
    fn device(&self, _path: &Path, meta: &Metadata) -> u64 {
        meta.dev()
    }
}

pub(crate) struct TreeRemover<D> {
    devices: D,
    removed: usize,
    errors: usize,
}

impl<D: DeviceLookup> TreeRemover<D> {
    pub(crate) fn new(devices: D) -> Self {
        Self {
            devices,
            removed: 0,
            errors: 0,
        }
    }

    pub(crate) fn run(mut self, root: &Path) -> Result<usize, RemoveTreeError> {
        match fs::symlink_metadata(root) {
            Ok(meta) => {
                let root_dev = self.devices.device(root, &meta);
                self.visit(root, &meta, root_dev);
            }
            Err(e) => self.report(root, "stat", &e),
        }

        if self.errors == 0 {
            Ok(self.removed)
        } else {
            Err(RemoveTreeError {
                root: root.to_path_buf(),
                errors: self.errors,
                removed: self.removed,
            })
        }
    }

    fn visit(&mut self, path: &Path, meta: &Metadata, root_dev: u64) {
        // lstat metadata: a symlink to a directory is not a directory here.
        if !meta.file_type().is_dir() {
            self.remove(path, fs::remove_file(path));
            return;
        }

        if self.devices.device(path, meta) == root_dev {
            self.descend(path, root_dev);
        } else {
            debug!("not descending into mount point {}", path.display());
        }
        self.remove(path, fs::remove_dir(path));
    }

    fn descend(&mut self, dir: &Path, root_dev: u64) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.report(dir, "read", &e);
                return;
            }
        };

        // Read the whole directory before removing anything from it.
        let mut children = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => children.push(entry.path()),
                Err(e) => self.report(dir, "read", &e),
            }
        }

        for child in children {
            match fs::symlink_metadata(&child) {
                Ok(meta) => self.visit(&child, &meta, root_dev),
                Err(e) => self.report(&child, "stat", &e),
            }
        }
    }

    fn remove(&mut self, path: &Path, result: io::Result<()>) {
        match result {
            Ok(()) => self.removed += 1,
            Err(e) => self.report(path, "remove", &e),
        }
    }

    fn report(&mut self, path: &Path, op: &str, e: &io::Error) {
        warn!("{}: failed to {op}: {e}", path.display());
        self.errors += 1;
    }
}
