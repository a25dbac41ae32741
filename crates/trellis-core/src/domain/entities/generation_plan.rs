use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::entities::{
    common::{ensure_contained, Permissions},
    manifest::{Manifest, ScriptTable},
};
use crate::domain::error::DomainError;

/// Everything a generator decided, ready for materialization.
///
/// Directories are an ordered set; registering a path registers its
/// ancestors first. Adding a file registers its parent chain, so a plan
/// built through these methods never holds a dangling file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationPlan {
    directories: Vec<PathBuf>,
    known_dirs: HashSet<PathBuf>,
    files: Vec<PlannedFile>,
    manifest: Manifest,
    scripts: ScriptTable,
    next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub content: String,
    pub permissions: Permissions,
}

impl PlannedFile {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

impl GenerationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_directory(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut chain: Vec<&Path> = path
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        chain.reverse();
        for dir in chain {
            if self.known_dirs.insert(dir.to_path_buf()) {
                self.directories.push(dir.to_path_buf());
            }
        }
    }

    /// Add or replace a file. A replaced file keeps its original position.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.put(path.into(), content.into(), Permissions::read_write());
    }

    pub fn add_executable(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.put(path.into(), content.into(), Permissions::executable());
    }

    fn put(&mut self, path: PathBuf, content: String, permissions: Permissions) {
        if let Some(parent) = path.parent() {
            self.add_directory(parent);
        }
        match self.files.iter_mut().find(|f| f.path == path) {
            Some(existing) => {
                existing.content = content;
                existing.permissions = permissions;
            }
            None => self.files.push(PlannedFile {
                path,
                content,
                permissions,
            }),
        }
    }

    pub fn set_manifest(&mut self, manifest: Manifest) {
        self.manifest = manifest;
    }

    pub fn set_scripts(&mut self, scripts: ScriptTable) {
        self.scripts = scripts;
    }

    pub fn set_next_steps(&mut self, steps: Vec<String>) {
        self.next_steps = steps;
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<&PlannedFile> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path == path)
    }

    pub fn has_file(&self, path: impl AsRef<Path>) -> bool {
        self.file(path).is_some()
    }

    pub fn has_directory(&self, path: impl AsRef<Path>) -> bool {
        self.known_dirs.contains(path.as_ref())
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn scripts(&self) -> &ScriptTable {
        &self.scripts
    }

    pub fn next_steps(&self) -> &[String] {
        &self.next_steps
    }

    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(PlannedFile::size).sum()
    }

    /// Check the plan can be written under a root without escaping it.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::EmptyPlan);
        }
        for dir in &self.directories {
            ensure_contained(dir)?;
        }
        for file in &self.files {
            ensure_contained(&file.path)?;
            let dangling = file
                .path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .is_some_and(|p| !self.known_dirs.contains(p));
            if dangling {
                return Err(DomainError::DanglingFile {
                    path: file.path.display().to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestors_are_registered_in_order() {
        let mut plan = GenerationPlan::new();
        plan.add_directory("src/app/api");
        plan.add_directory("src/app");

        let dirs: Vec<_> = plan.directories().iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(dirs, vec!["src", "src/app", "src/app/api"]);
    }

    #[test]
    fn files_register_their_parents() {
        let mut plan = GenerationPlan::new();
        plan.add_file("src/components/App.tsx", "x");
        plan.add_file("README.md", "y");

        assert!(plan.has_directory("src"));
        assert!(plan.has_directory("src/components"));
        assert_eq!(plan.directories().len(), 2);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn replacing_a_file_keeps_position() {
        let mut plan = GenerationPlan::new();
        plan.add_file("a.txt", "1");
        plan.add_file("b.txt", "2");
        plan.add_executable("a.txt", "3");

        assert_eq!(plan.files().len(), 2);
        assert_eq!(plan.files()[0].content, "3");
        assert!(plan.files()[0].permissions.executable_flag());
    }

    #[test]
    fn empty_plan_is_rejected() {
        let mut plan = GenerationPlan::new();
        plan.add_directory("src");
        assert_eq!(plan.validate(), Err(DomainError::EmptyPlan));
    }

    #[test]
    fn escaping_paths_are_rejected() {
        let mut plan = GenerationPlan::new();
        plan.add_file("../outside.txt", "x");
        assert!(matches!(
            plan.validate(),
            Err(DomainError::PathEscapesRoot { .. })
        ));
    }
}
