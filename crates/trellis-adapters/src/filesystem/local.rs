//! Local filesystem adapter using `std::fs`.

use std::io;
use std::path::Path;

use tracing::trace;
use trellis_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{TrellisError, TrellisResult},
};

/// Production filesystem implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> TrellisResult<()> {
        trace!(path = %path.display(), "mkdir -p");
        std::fs::create_dir_all(path).map_err(|e| io_error(path, e, "create directory"))
    }

    fn create_dir(&self, path: &Path) -> TrellisResult<()> {
        trace!(path = %path.display(), "mkdir");
        std::fs::create_dir(path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ApplicationError::DirectoryConflict {
                path: path.to_path_buf(),
            }
            .into(),
            _ => io_error(path, e, "create directory"),
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> TrellisResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "write");
        std::fs::write(path, content).map_err(|e| io_error(path, e, "write file"))
    }

    #[cfg(unix)]
    fn set_permissions(&self, path: &Path, executable: bool) -> TrellisResult<()> {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = std::fs::metadata(path)
            .map_err(|e| io_error(path, e, "read metadata"))?
            .permissions();
        let mode = perms.mode();
        perms.set_mode(if executable { mode | 0o111 } else { mode & !0o111 });
        std::fs::set_permissions(path, perms).map_err(|e| io_error(path, e, "set permissions"))
    }

    #[cfg(not(unix))]
    fn set_permissions(&self, _path: &Path, _executable: bool) -> TrellisResult<()> {
        // No executable bit to set.
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        // Dangling symlinks count as occupied.
        path.symlink_metadata().is_ok()
    }

    fn remove_dir_all(&self, path: &Path) -> TrellisResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| io_error(path, e, "remove directory"))
    }
}

fn io_error(path: &Path, e: io::Error, operation: &str) -> TrellisError {
    ApplicationError::io(path, format!("failed to {operation}: {e}")).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_nested_files() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = tmp.path().join("a/b");

        fs.create_dir_all(&dir).unwrap();
        fs.write_file(&dir.join("c.txt"), "hello").unwrap();

        assert_eq!(std::fs::read_to_string(dir.join("c.txt")).unwrap(), "hello");
        assert!(fs.exists(&dir));
    }

    #[test]
    fn create_dir_refuses_existing_paths() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem;
        let root = tmp.path().join("app");

        fs.create_dir(&root).unwrap();
        assert!(err_is_conflict(fs.create_dir(&root)));

        let file = tmp.path().join("taken");
        fs.write_file(&file, "").unwrap();
        assert!(err_is_conflict(fs.create_dir(&file)));
    }

    #[test]
    fn create_dir_needs_parent() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFilesystem
            .create_dir(&tmp.path().join("a/b"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to create directory"));
    }

    fn err_is_conflict(result: TrellisResult<()>) -> bool {
        matches!(
            result,
            Err(TrellisError::Application(ApplicationError::DirectoryConflict { .. }))
        )
    }

    #[test]
    fn write_into_missing_directory_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFilesystem
            .write_file(&tmp.path().join("missing/x.txt"), "x")
            .unwrap_err();
        assert!(err.to_string().contains("failed to write file"));
    }

    #[cfg(unix)]
    #[test]
    fn toggles_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("run.sh");
        let fs = LocalFilesystem;
        fs.write_file(&path, "#!/bin/sh\n").unwrap();

        fs.set_permissions(&path, true).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);

        fs.set_permissions(&path, false).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0);
    }

    #[test]
    fn remove_dir_all_clears_tree() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("proj");
        let fs = LocalFilesystem;
        fs.create_dir_all(&root.join("src")).unwrap();
        fs.write_file(&root.join("src/main.js"), "").unwrap();

        fs.remove_dir_all(&root).unwrap();
        assert!(!fs.exists(&root));
    }
}
