//! Disk-scoped storage keyed by relative path.
//!
//! Drivers never touch the filesystem directly. They go through a
//! [`Storage`] picked by disk name, which keeps paths relative to a
//! configured root and lets tests substitute a double.

mod file_locks;
mod local_disk;

pub use file_locks::FileLocks;
pub use local_disk::LocalDisk;

use crate::error::{LoggerError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Storage operations a driver needs. Paths are relative to the disk root.
#[cfg_attr(test, mockall::automock)]
pub trait Storage: Send + Sync {
    fn exists(&self, path: &str) -> Result<bool>;

    /// Read the whole file as UTF-8.
    fn get(&self, path: &str) -> Result<String>;

    /// Create or truncate the file with `contents`.
    fn put(&self, path: &str, contents: &str) -> Result<()>;

    /// Append `contents` to the file, creating it if needed.
    fn append(&self, path: &str, contents: &str) -> Result<()>;

    fn rename(&self, from: &str, to: &str) -> Result<()>;

    /// Identity of the file behind `path` for in-process locking. Two disks
    /// that reach the same file must return the same key.
    fn lock_key(&self, path: &str) -> Result<String>;
}

/// Named disks, resolved from configuration.
#[derive(Clone, Default)]
pub struct Disks {
    disks: HashMap<String, Arc<dyn Storage>>,
}

impl Disks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a disk.
    pub fn insert(&mut self, name: impl Into<String>, storage: Arc<dyn Storage>) {
        self.disks.insert(name.into(), storage);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Storage>> {
        self.disks
            .get(name)
            .cloned()
            .ok_or_else(|| LoggerError::unknown("disk", name))
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }
}

impl std::fmt::Debug for Disks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.disks.keys().collect();
        names.sort();
        f.debug_struct("Disks").field("names", &names).finish()
    }
}
