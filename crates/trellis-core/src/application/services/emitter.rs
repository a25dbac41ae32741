//! Writes a [`GenerationPlan`] through the [`Filesystem`] port.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::GenerationPlan,
    error::TrellisResult,
};

/// One-shot materializer for a plan under a fresh root directory.
pub struct FileTreeEmitter<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> FileTreeEmitter<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Fail with `DirectoryConflict` if `root` exists. Nothing is written
    /// in that case.
    pub fn ensure_vacant(&self, root: &Path) -> TrellisResult<()> {
        if self.filesystem.exists(root) {
            return Err(ApplicationError::DirectoryConflict {
                path: root.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    /// Create `root`, every planned directory, then every file in order.
    ///
    /// On a write failure the root is removed again (best effort) and the
    /// original error is returned. If `root` cannot be claimed nothing is
    /// removed.
    #[instrument(skip_all, fields(root = %root.display(), files = plan.files().len()))]
    pub fn materialize(&self, root: &Path, plan: &GenerationPlan) -> TrellisResult<()> {
        self.ensure_vacant(root)?;
        self.claim_root(root)?;

        match self.write_contents(root, plan) {
            Ok(()) => {
                info!(bytes = plan.total_bytes(), "project written");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "write failed, rolling back");
                self.rollback(root);
                Err(e)
            }
        }
    }

    /// Parents may already exist; `root` itself must not. A directory that
    /// appears between `ensure_vacant` and here surfaces as a conflict.
    fn claim_root(&self, root: &Path) -> TrellisResult<()> {
        if let Some(parent) = root.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.create_dir(root)
    }

    fn write_contents(&self, root: &Path, plan: &GenerationPlan) -> TrellisResult<()> {
        for dir in plan.directories() {
            self.filesystem.create_dir_all(&root.join(dir))?;
        }

        for file in plan.files() {
            let path = root.join(&file.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;
            if file.permissions.executable_flag() {
                self.filesystem.set_permissions(&path, true)?;
            }
            debug!(path = %file.path.display(), bytes = file.size(), "wrote");
        }
        Ok(())
    }

    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            let failure = ApplicationError::RollbackFailed {
                path: root.to_path_buf(),
                reason: e.to_string(),
            };
            warn!(error = %failure, "rollback failed");
        } else {
            info!("rollback complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mockall::predicate::eq;

    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::error::TrellisError;

    fn plan() -> GenerationPlan {
        let mut plan = GenerationPlan::new();
        plan.add_directory("assets");
        plan.add_file("src/index.js", "console.log(1);\n");
        plan.add_executable("bin/run", "#!/bin/sh\n");
        plan
    }

    #[test]
    fn conflict_performs_no_writes() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_dir_all().never();
        fs.expect_create_dir().never();
        fs.expect_write_file().never();
        fs.expect_remove_dir_all().never();

        let err = FileTreeEmitter::new(&fs)
            .materialize(Path::new("/out/app"), &plan())
            .unwrap_err();
        assert!(matches!(
            err,
            TrellisError::Application(ApplicationError::DirectoryConflict { .. })
        ));
    }

    #[test]
    fn root_claimed_by_another_process_is_left_alone() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all()
            .with(eq(PathBuf::from("/out")))
            .returning(|_| Ok(()));
        fs.expect_create_dir()
            .with(eq(PathBuf::from("/out/app")))
            .times(1)
            .returning(|p| {
                Err(ApplicationError::DirectoryConflict {
                    path: p.to_path_buf(),
                }
                .into())
            });
        fs.expect_write_file().never();
        fs.expect_remove_dir_all().never();

        let err = FileTreeEmitter::new(&fs)
            .materialize(Path::new("/out/app"), &plan())
            .unwrap_err();
        assert!(err.is_preflight());
    }

    #[test]
    fn writes_files_and_marks_executables() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_dir()
            .with(eq(PathBuf::from("/out/app")))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file().times(2).returning(|_, _| Ok(()));
        fs.expect_set_permissions()
            .with(eq(PathBuf::from("/out/app/bin/run")), eq(true))
            .times(1)
            .returning(|_, _| Ok(()));

        FileTreeEmitter::new(&fs)
            .materialize(Path::new("/out/app"), &plan())
            .unwrap();
    }

    #[test]
    fn failed_write_rolls_back_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file()
            .returning(|p, _| Err(ApplicationError::io(p, "disk full").into()));
        fs.expect_remove_dir_all()
            .with(eq(PathBuf::from("/out/app")))
            .times(1)
            .returning(|_| Ok(()));

        let err = FileTreeEmitter::new(&fs)
            .materialize(Path::new("/out/app"), &plan())
            .unwrap_err();
        assert_eq!(err.category(), crate::error::ErrorCategory::Io);
    }

    #[test]
    fn rollback_failure_keeps_original_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file()
            .returning(|p, _| Err(ApplicationError::io(p, "read-only").into()));
        fs.expect_remove_dir_all()
            .times(1)
            .returning(|p| Err(ApplicationError::io(p, "busy").into()));

        let err = FileTreeEmitter::new(&fs)
            .materialize(Path::new("/out/app"), &plan())
            .unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }
}
