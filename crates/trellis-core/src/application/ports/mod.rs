//! Application ports (traits) for external dependencies.
//!
//! Adapters in `trellis-adapters` implement these:
//!
//! - `Filesystem`: directory and file writes under a project root
//! - `TemplateRenderer`: template id + config to file text

use std::path::Path;

use crate::domain::{ProjectConfig, TemplateId};
use crate::error::TrellisResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `trellis_adapters::filesystem::LocalFilesystem` (production)
/// - `trellis_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Existing directories
    /// are not an error.
    fn create_dir_all(&self, path: &Path) -> TrellisResult<()>;

    /// Create exactly one directory. The parent must exist. Fails with
    /// `DirectoryConflict` if anything already occupies `path`.
    fn create_dir(&self, path: &Path) -> TrellisResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> TrellisResult<()>;

    /// Set or clear the executable bit.
    fn set_permissions(&self, path: &Path, executable: bool) -> TrellisResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> TrellisResult<()>;
}

/// Port for template rendering.
///
/// Must be pure: the same `(id, config)` always yields the same text.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, id: TemplateId, config: &ProjectConfig) -> TrellisResult<String>;
}
