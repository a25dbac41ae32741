//! The configuration model: raw input and its normalized, immutable form.
//!
//! `RawProjectConfig` is what a caller hands in (CLI flags, a TOML or JSON
//! document). Every field is optional there. `normalize` applies defaults,
//! parses enumerated fields into their sum types, forces the language for
//! Python-only stacks and splits the feature string into a [`FeatureSet`].
//!
//! Once a `ProjectConfig` exists it never changes; generators only read it.

use serde::Deserialize;
use std::str::FromStr;

use crate::domain::{
    error::DomainError,
    value_objects::{
        CssFramework, Database, FeatureTag, Language, Orm, PackageManager, ProjectType,
    },
};

pub const DEFAULT_LICENSE: &str = "MIT";
pub const DEFAULT_VERSION: &str = "0.1.0";
pub const DEFAULT_NODE_VERSION: &str = "22";
pub const DEFAULT_PYTHON_VERSION: &str = "3.12";

// ── Raw input ────────────────────────────────────────────────────────────────

/// Unvalidated configuration, straight from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawProjectConfig {
    pub name: Option<String>,
    pub project_type: Option<String>,

    pub language: Option<String>,
    pub package_manager: Option<String>,
    pub css_framework: Option<String>,
    pub database: Option<String>,
    pub orm: Option<String>,

    pub eslint: Option<bool>,
    pub prettier: Option<bool>,
    pub testing: Option<bool>,
    pub docker: Option<bool>,
    pub github_actions: Option<bool>,
    pub typescript_strict: Option<bool>,
    pub type_hints: Option<bool>,
    pub ruff: Option<bool>,
    pub mypy: Option<bool>,
    pub pytest: Option<bool>,

    /// Comma-separated feature tags, e.g. `"pinia, vue-router"`.
    pub features: Option<String>,

    pub description: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    pub version: Option<String>,
    pub node_version: Option<String>,
    pub python_version: Option<String>,
}

impl RawProjectConfig {
    pub fn new(project_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            project_type: Some(project_type.into()),
            ..Self::default()
        }
    }

    /// Validate and resolve into an immutable [`ProjectConfig`].
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` for a missing or malformed name, a missing project
    ///   type, or an enumerated field with an unknown value
    /// - `UnknownProjectType` when the project type is not registered
    pub fn normalize(&self) -> Result<ProjectConfig, DomainError> {
        let name = validate_name(self.name.as_deref())?;

        let project_type = match non_blank(self.project_type.as_deref()) {
            Some(raw) => ProjectType::from_str(raw)?,
            None => return Err(DomainError::invalid("project_type", "is required")),
        };

        let requested = parse_or(self.language.as_deref(), Language::TypeScript)?;
        let language = if project_type.forces_python() {
            Language::Python
        } else {
            requested
        };

        let package_manager = parse_or(
            self.package_manager.as_deref(),
            PackageManager::default_for(language),
        )?;

        let toggles = Toggles {
            eslint: self.eslint.unwrap_or(true),
            prettier: self.prettier.unwrap_or(true),
            testing: self.testing.unwrap_or(true),
            docker: self.docker.unwrap_or(false),
            github_actions: self.github_actions.unwrap_or(false),
            typescript_strict: self.typescript_strict.unwrap_or(true),
            type_hints: self.type_hints.unwrap_or(true),
            ruff: self.ruff.unwrap_or(true),
            mypy: self.mypy.unwrap_or(true),
            pytest: self.pytest.unwrap_or(true),
        };

        Ok(ProjectConfig {
            name,
            project_type,
            language,
            package_manager,
            css_framework: parse_or(self.css_framework.as_deref(), CssFramework::None)?,
            database: parse_or(self.database.as_deref(), Database::None)?,
            orm: parse_or(self.orm.as_deref(), Orm::None)?,
            toggles,
            features: FeatureSet::parse(self.features.as_deref().unwrap_or_default()),
            description: text_or(self.description.as_deref(), ""),
            author: text_or(self.author.as_deref(), ""),
            license: text_or(self.license.as_deref(), DEFAULT_LICENSE),
            version: version_or("version", self.version.as_deref(), DEFAULT_VERSION)?,
            node_version: version_or(
                "node_version",
                self.node_version.as_deref(),
                DEFAULT_NODE_VERSION,
            )?,
            python_version: version_or(
                "python_version",
                self.python_version.as_deref(),
                DEFAULT_PYTHON_VERSION,
            )?,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_or<T>(value: Option<&str>, default: T) -> Result<T, DomainError>
where
    T: FromStr<Err = DomainError>,
{
    non_blank(value).map_or(Ok(default), T::from_str)
}

fn text_or(value: Option<&str>, default: &str) -> String {
    non_blank(value).unwrap_or(default).to_string()
}

/// Versions end up unquoted in Dockerfiles and quoted in TOML and Python
/// sources, so only version-like characters are accepted.
fn version_or(
    field: &'static str,
    value: Option<&str>,
    default: &str,
) -> Result<String, DomainError> {
    let version = non_blank(value).unwrap_or(default);
    if !version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+'))
    {
        return Err(DomainError::invalid(
            field,
            format!("'{version}' is not a version"),
        ));
    }
    Ok(version.to_string())
}

fn validate_name(name: Option<&str>) -> Result<String, DomainError> {
    let Some(name) = non_blank(name) else {
        return Err(DomainError::invalid("name", "is required"));
    };
    if name == "." || name == ".." {
        return Err(DomainError::invalid(
            "name",
            format!("'{name}' is not a directory name"),
        ));
    }
    if name.contains(['/', '\\']) {
        return Err(DomainError::invalid(
            "name",
            format!("'{name}' must not contain path separators"),
        ));
    }
    if name.chars().any(char::is_control) {
        return Err(DomainError::invalid(
            "name",
            "must not contain control characters",
        ));
    }
    Ok(name.to_string())
}

// ── Normalized form ──────────────────────────────────────────────────────────

/// Boolean tooling switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Toggles {
    pub eslint: bool,
    pub prettier: bool,
    pub testing: bool,
    pub docker: bool,
    pub github_actions: bool,
    pub typescript_strict: bool,
    pub type_hints: bool,
    pub ruff: bool,
    pub mypy: bool,
    pub pytest: bool,
}

/// De-duplicated feature tags in first-seen order.
///
/// Strings outside the closed [`FeatureTag`] set are kept in `unknown` so
/// the caller can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    tags: Vec<FeatureTag>,
    unknown: Vec<String>,
}

impl FeatureSet {
    pub fn parse(raw: &str) -> Self {
        let mut set = Self::default();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match FeatureTag::parse(entry) {
                Some(tag) if !set.tags.contains(&tag) => set.tags.push(tag),
                Some(_) => {}
                None => {
                    let lowered = entry.to_ascii_lowercase();
                    if !set.unknown.contains(&lowered) {
                        set.unknown.push(lowered);
                    }
                }
            }
        }
        set
    }

    pub fn contains(&self, tag: FeatureTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn tags(&self) -> &[FeatureTag] {
        &self.tags
    }

    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.unknown.is_empty()
    }
}

/// Validated, immutable description of the project to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    name: String,
    project_type: ProjectType,
    language: Language,
    package_manager: PackageManager,
    css_framework: CssFramework,
    database: Database,
    orm: Orm,
    toggles: Toggles,
    features: FeatureSet,
    description: String,
    author: String,
    license: String,
    version: String,
    node_version: String,
    python_version: String,
}

impl ProjectConfig {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub const fn project_type(&self) -> ProjectType {
        self.project_type
    }
    pub const fn language(&self) -> Language {
        self.language
    }
    pub const fn package_manager(&self) -> PackageManager {
        self.package_manager
    }
    pub const fn css_framework(&self) -> CssFramework {
        self.css_framework
    }
    pub const fn database(&self) -> Database {
        self.database
    }
    pub const fn orm(&self) -> Orm {
        self.orm
    }
    pub const fn toggles(&self) -> Toggles {
        self.toggles
    }
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn author(&self) -> &str {
        &self.author
    }
    pub fn license(&self) -> &str {
        &self.license
    }
    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn node_version(&self) -> &str {
        &self.node_version
    }
    pub fn python_version(&self) -> &str {
        &self.python_version
    }

    pub fn has(&self, tag: FeatureTag) -> bool {
        self.features.contains(tag)
    }

    pub fn is_typescript(&self) -> bool {
        self.language == Language::TypeScript
    }

    pub fn is_python(&self) -> bool {
        self.language == Language::Python
    }

    pub fn uses_tailwind(&self) -> bool {
        self.css_framework == CssFramework::Tailwind
    }

    /// Importable module name: the project name with `-` replaced by `_`.
    /// The name as a Python identifier: lowercase ASCII, everything else `_`.
    pub fn module_name(&self) -> String {
        self.name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}
