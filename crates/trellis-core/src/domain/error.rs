use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("unknown project type '{project_type}'")]
    UnknownProjectType { project_type: String },

    // ========================================================================
    // Plan Integrity
    // ========================================================================
    #[error("absolute paths not allowed in a generation plan: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("path escapes the project root: {path}")]
    PathEscapesRoot { path: String },

    #[error("file '{path}' has no registered parent directory")]
    DanglingFile { path: String },

    #[error("generation plan is empty")]
    EmptyPlan,

    #[error("manifest entry '{key}' has an empty value")]
    EmptyManifestValue { key: String },

    // ========================================================================
    // Rendering
    // ========================================================================
    #[error("template '{template}' has an unresolved placeholder {{{{{placeholder}}}}}")]
    UnresolvedPlaceholder {
        template: &'static str,
        placeholder: String,
    },
}

impl DomainError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfig { field, .. } => vec![
                format!("Check the value given for '{field}'"),
                "Use --help for accepted values".into(),
            ],
            Self::UnknownProjectType { .. } => vec![
                "Run 'trellis list' to see the registered project types".into(),
                "Example: trellis new react my-app --typescript".into(),
            ],
            _ => vec!["This is a generator bug, please report it".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig { .. } => ErrorCategory::Validation,
            Self::UnknownProjectType { .. } => ErrorCategory::NotFound,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
