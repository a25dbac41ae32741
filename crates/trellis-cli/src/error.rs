//! Error handling for the Trellis CLI.
//!
//! Every failure is printed as a single line. Suggestions and the cause
//! chain only appear with `-v`.

use std::error::Error as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use trellis_core::error::{ErrorCategory as CoreCategory, TrellisError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// An error propagated from `trellis-core`; displayed unchanged.
    #[error("{0}")]
    Core(#[from] TrellisError),

    /// A configuration file could not be read, parsed, or written.
    #[error("configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `trellis config get` with a key that does not exist.
    #[error("unknown config key '{key}'")]
    UnknownConfigKey { key: String },

    /// `trellis init` would overwrite an existing file.
    #[error("config file already exists at {path}")]
    ConfigExists { path: PathBuf },

    /// An I/O operation outside the scaffold itself failed.
    #[error("{message}: {source}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: "failed to write output".into(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core_err) => core_err.suggestions(),

            Self::ConfigError { .. } => vec![
                "Check the TOML syntax of your config file".into(),
                "Run 'trellis config path' to see which file is used".into(),
                "Run 'trellis init --force' to start from the defaults".into(),
            ],

            Self::UnknownConfigKey { .. } => vec![
                "Run 'trellis config list' to see every key".into(),
                "Keys are dotted, e.g. defaults.author".into(),
            ],

            Self::ConfigExists { .. } => vec!["Pass --force to overwrite it".into()],

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and logging.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Io | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::UnknownConfigKey { .. } => ErrorCategory::NotFound,
            Self::ConfigExists { .. } => ErrorCategory::UserError,
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS. Every failure exits with 1.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Format the error for display with colors.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = format!("{} {}\n", "error:".red().bold(), self);

        if verbose {
            for cause in self.causes() {
                output.push_str(&format!("  {} {}\n", "→".dimmed(), cause.dimmed()));
            }
            let suggestions = self.suggestions();
            if !suggestions.is_empty() {
                output.push_str(&format!("{}\n", "Suggestions:".yellow().bold()));
                for suggestion in suggestions {
                    output.push_str(&format!("  {suggestion}\n"));
                }
            }
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("error: {self}\n");

        if verbose {
            for cause in self.causes() {
                out.push_str(&format!("  Caused by: {cause}\n"));
            }
            let suggestions = self.suggestions();
            if !suggestions.is_empty() {
                out.push_str("Suggestions:\n");
                for s in &suggestions {
                    out.push_str(&format!("  {s}\n"));
                }
            }
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::debug!("User error: {}", self),
            ErrorCategory::NotFound => tracing::debug!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::info!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::info!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }

    /// Sources not already part of the top-level message.
    fn causes(&self) -> Vec<String> {
        if matches!(self, Self::IoError { .. }) {
            return Vec::new();
        }
        let mut causes = Vec::new();
        let mut source = self.source();
        while let Some(err) = source {
            causes.push(err.to_string());
            source = err.source();
        }
        causes
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, conflicts).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, toml::ser::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: f().into(),
            source: Some(Box::new(e)),
        })
    }
}
