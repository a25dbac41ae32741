//! Unified error handling for Trellis Core.
//!
//! `TrellisError` wraps domain and application errors so callers match on
//! one type, and carries user-actionable suggestions for the CLI.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{self, DomainError};

/// Root error type for Trellis Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrellisError {
    /// Invalid input or an unregistered project type.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Failures while rendering or writing the plan.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl TrellisError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec!["This appears to be a bug in Trellis".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                domain::ErrorCategory::Validation => ErrorCategory::Validation,
                domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// True when the failure happened before anything touched the disk.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::InvalidConfig { .. })
                | Self::Domain(DomainError::UnknownProjectType { .. })
                | Self::Application(ApplicationError::DirectoryConflict { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Io,
    Internal,
}

/// Convenient result type alias.
pub type TrellisResult<T> = Result<T, TrellisError>;
