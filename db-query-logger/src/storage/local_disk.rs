/// Local filesystem storage rooted at a directory
use crate::error::{LoggerError, Result};
use crate::storage::Storage;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// A disk backed by a directory on the local filesystem.
///
/// Parent directories are created on write. Absolute paths and `..`
/// components are rejected so nothing escapes the root. [`Storage::put`]
/// stages the new contents in a sibling file and renames it into place, so
/// readers see either the old file or the new one.
#[derive(Debug, Clone)]
pub struct LocalDisk {
    root: PathBuf,
}

impl LocalDisk {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a relative storage path onto the filesystem.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        if path.is_empty() {
            return Err(LoggerError::InvalidPath("empty path".to_string()));
        }
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => return Err(LoggerError::InvalidPath(path.to_string())),
            }
        }
        Ok(self.root.join(relative))
    }

    /// Sibling file a replacement is staged in before it is renamed over
    /// `full`.
    fn staging_path(full: &Path) -> PathBuf {
        let name = full
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        full.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
    }

    fn ensure_parent(&self, full: &Path) -> Result<()> {
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| LoggerError::io(parent, e))?;
        }
        Ok(())
    }
}

impl Storage for LocalDisk {
    fn exists(&self, path: &str) -> Result<bool> {
        let full = self.resolve(path)?;
        full.try_exists().map_err(|e| LoggerError::io(&full, e))
    }

    fn get(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        fs::read_to_string(&full).map_err(|e| LoggerError::io(&full, e))
    }

    fn put(&self, path: &str, contents: &str) -> Result<()> {
        let full = self.resolve(path)?;
        self.ensure_parent(&full)?;
        let staging = Self::staging_path(&full);
        fs::write(&staging, contents).map_err(|e| LoggerError::io(&staging, e))?;
        fs::rename(&staging, &full).map_err(|e| {
            let _ = fs::remove_file(&staging);
            LoggerError::io(&full, e)
        })
    }

    fn append(&self, path: &str, contents: &str) -> Result<()> {
        let full = self.resolve(path)?;
        self.ensure_parent(&full)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full)
            .map_err(|e| LoggerError::io(&full, e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| LoggerError::io(&full, e))?;
        file.flush().map_err(|e| LoggerError::io(&full, e))
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        let source = self.resolve(from)?;
        let target = self.resolve(to)?;
        self.ensure_parent(&target)?;
        fs::rename(&source, &target).map_err(|e| LoggerError::io(&source, e))
    }

    /// The absolute path of the file, with `.` components dropped.
    fn lock_key(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        let absolute = if full.is_absolute() {
            full
        } else {
            let cwd = std::env::current_dir().map_err(|e| LoggerError::io(&full, e))?;
            cwd.join(full)
        };
        let normalized: PathBuf = absolute.components().collect();
        Ok(normalized.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_put_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path());

        disk.put("a/b/c.json", "[]").unwrap();

        assert!(dir.path().join("a/b/c.json").exists());
        assert_eq!(disk.get("a/b/c.json").unwrap(), "[]");
    }

    #[test]
    fn test_append_accumulates() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path());

        disk.append("logs/q.log", "one\n").unwrap();
        disk.append("logs/q.log", "two\n").unwrap();

        assert_eq!(disk.get("logs/q.log").unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_exists() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path());

        assert!(!disk.exists("missing.log").unwrap());
        disk.put("present.log", "").unwrap();
        assert!(disk.exists("present.log").unwrap());
    }

    #[test]
    fn test_rename() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path());

        disk.put("x.json", "{").unwrap();
        disk.rename("x.json", "x.json.bak").unwrap();

        assert!(!disk.exists("x.json").unwrap());
        assert_eq!(disk.get("x.json.bak").unwrap(), "{");
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let disk = LocalDisk::new("/tmp/root");
        assert!(matches!(
            disk.resolve("../etc/passwd"),
            Err(LoggerError::InvalidPath(_))
        ));
        assert!(matches!(
            disk.resolve("/etc/passwd"),
            Err(LoggerError::InvalidPath(_))
        ));
        assert!(matches!(disk.resolve(""), Err(LoggerError::InvalidPath(_))));
        assert!(disk.resolve("./logs/a.log").is_ok());
    }

    #[test]
    fn test_put_replaces_without_leaving_staging_files() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path());

        disk.put("logs/q.json", "[1]").unwrap();
        disk.put("logs/q.json", "[1, 2]").unwrap();

        assert_eq!(disk.get("logs/q.json").unwrap(), "[1, 2]");
        let names: Vec<_> = fs::read_dir(dir.path().join("logs"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("q.json")]);
    }

    #[test]
    fn test_lock_key_is_shared_by_disks_on_one_root() {
        let dir = tempdir().unwrap();
        let plain = LocalDisk::new(dir.path());
        let dotted = LocalDisk::new(dir.path().join("."));

        assert_eq!(
            plain.lock_key("logs/a.json").unwrap(),
            dotted.lock_key("./logs/a.json").unwrap()
        );
        assert_ne!(
            plain.lock_key("logs/a.json").unwrap(),
            plain.lock_key("logs/b.json").unwrap()
        );
    }

    #[test]
    fn test_lock_key_of_relative_root_is_absolute() {
        let disk = LocalDisk::new("storage/logs");
        let key = disk.lock_key("q.json").unwrap();
        assert!(Path::new(&key).is_absolute());
        assert!(key.ends_with("q.json"));
    }

    #[test]
    fn test_get_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let disk = LocalDisk::new(dir.path());
        assert!(matches!(disk.get("nope.log"), Err(LoggerError::Io { .. })));
    }
}
