//! In-memory filesystem adapter for tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use trellis_core::{
    application::{ApplicationError, ports::Filesystem},
    error::TrellisResult,
};

/// In-memory filesystem. Clones share the same storage, so a test can hand
/// one clone to a service and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    executables: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TrellisResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::FilesystemLock.into())
    }

    fn write(&self) -> TrellisResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::FilesystemLock.into())
    }

    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read().ok()?.files.get(path).cloned()
    }

    pub fn is_executable(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.executables.contains(path))
            .unwrap_or(false)
    }

    /// Every file path, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of files currently stored.
    pub fn file_count(&self) -> usize {
        self.read().map(|inner| inner.files.len()).unwrap_or(0)
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> TrellisResult<()> {
        let mut inner = self.write()?;
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> TrellisResult<()> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) || inner.directories.contains(path) {
            return Err(ApplicationError::DirectoryConflict {
                path: path.to_path_buf(),
            }
            .into());
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::io(path, "parent directory does not exist").into());
            }
        }
        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> TrellisResult<()> {
        let mut inner = self.write()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::io(path, "parent directory does not exist").into());
            }
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> TrellisResult<()> {
        let mut inner = self.write()?;
        if !inner.files.contains_key(path) {
            return Err(ApplicationError::io(path, "no such file").into());
        }
        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> TrellisResult<()> {
        let mut inner = self.write()?;
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.executables.retain(|p| !p.starts_with(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/p/a.txt"), "x").is_err());

        fs.create_dir_all(Path::new("/p")).unwrap();
        fs.write_file(Path::new("/p/a.txt"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/p/a.txt")).as_deref(), Some("x"));
        assert!(fs.exists(Path::new("/")));
    }

    #[test]
    fn create_dir_is_exclusive() {
        let fs = MemoryFilesystem::new();
        assert!(fs.create_dir(Path::new("out/app")).is_err());

        fs.create_dir_all(Path::new("out")).unwrap();
        fs.create_dir(Path::new("out/app")).unwrap();
        let err = fs.create_dir(Path::new("out/app")).unwrap_err();
        assert!(err.is_preflight());
    }

    #[test]
    fn clones_share_storage() {
        let fs = MemoryFilesystem::new();
        let view = fs.clone();
        fs.create_dir_all(Path::new("out")).unwrap();
        fs.write_file(Path::new("out/run"), "#!/bin/sh").unwrap();
        fs.set_permissions(Path::new("out/run"), true).unwrap();

        assert!(view.is_executable(Path::new("out/run")));
        assert_eq!(view.list_files(), vec![PathBuf::from("out/run")]);
    }

    #[test]
    fn remove_dir_all_drops_subtree_only() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("a/b")).unwrap();
        fs.create_dir_all(Path::new("c")).unwrap();
        fs.write_file(Path::new("a/b/f"), "").unwrap();

        fs.remove_dir_all(Path::new("a")).unwrap();

        assert!(!fs.exists(Path::new("a/b")));
        assert!(fs.exists(Path::new("c")));
        assert_eq!(fs.file_count(), 0);
    }
}
