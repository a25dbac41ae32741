//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not invalid
//! input. Input errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while planning or materializing a project.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The target directory already exists.
    #[error("directory already exists: {path}")]
    DirectoryConflict { path: PathBuf },

    /// A lower-level read or write failed.
    #[error("I/O failure at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A template could not be produced.
    #[error("failed to render template '{template}': {reason}")]
    RenderingFailed {
        template: &'static str,
        reason: String,
    },

    /// In-memory filesystem lock poisoned.
    #[error("filesystem lock poisoned")]
    FilesystemLock,

    /// Best-effort cleanup after a failed write did not complete.
    #[error("rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    pub fn io(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DirectoryConflict { path } => vec![
                format!("Remove or rename '{}'", path.display()),
                "Choose a different project name".into(),
                "Or pass --output-dir to generate somewhere else".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![format!(
                "Partial output may remain at '{}', delete it manually",
                path.display()
            )],
            Self::RenderingFailed { .. } | Self::FilesystemLock => {
                vec!["This is a generator bug, please report it".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DirectoryConflict { .. } => ErrorCategory::Conflict,
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } => ErrorCategory::Io,
            Self::RenderingFailed { .. } | Self::FilesystemLock => ErrorCategory::Internal,
        }
    }
}
