use super::DomainError;
use std::path::{Component, Path};

/// Mode bits for a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permissions {
    executable: bool,
}

impl Permissions {
    pub const fn read_write() -> Self {
        Self { executable: false }
    }

    pub const fn executable() -> Self {
        Self { executable: true }
    }

    pub const fn executable_flag(&self) -> bool {
        self.executable
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::read_write()
    }
}

/// Reject paths that would land outside the project root.
pub(crate) fn ensure_contained(path: &Path) -> Result<(), DomainError> {
    if path.is_absolute() {
        return Err(DomainError::AbsolutePathNotAllowed {
            path: path.display().to_string(),
        });
    }
    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(DomainError::PathEscapesRoot {
            path: path.display().to_string(),
        });
    }
    Ok(())
}
