//! Dependency and script maps, and the ordered rule composer that builds them.
//!
//! # Rule order
//!
//! A stack's rules run in declaration order. When two rules touch the same
//! package, the later one wins and the package keeps the position where it
//! was first inserted. Changing the order of a rule table changes output.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::entities::project_config::ProjectConfig;

// ── DependencyMap ────────────────────────────────────────────────────────────

/// Package name to version range, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap {
    entries: Vec<(String, String)>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or override. An existing key keeps its position.
    pub(crate) fn set(&mut self, name: &str, range: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = range.to_string(),
            None => self.entries.push((name.to_string(), range.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `requirements.txt` body: one `<package><range>` line per entry.
    pub fn to_requirements(&self) -> String {
        self.iter()
            .map(|(name, range)| format!("{name}{range}\n"))
            .collect()
    }
}

impl Serialize for DependencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, range) in &self.entries {
            map.serialize_entry(name, range)?;
        }
        map.end()
    }
}

// ── Rules ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepGroup {
    Runtime,
    Dev,
}

/// One step of a stack's dependency composition.
#[derive(Clone, Copy)]
pub struct DependencyRule {
    pub name: &'static str,
    pub group: DepGroup,
    pub when: fn(&ProjectConfig) -> bool,
    pub packages: &'static [(&'static str, &'static str)],
}

impl fmt::Debug for DependencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyRule")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("packages", &self.packages)
            .finish_non_exhaustive()
    }
}

impl DependencyRule {
    pub fn applies(&self, config: &ProjectConfig) -> bool {
        (self.when)(config)
    }
}

/// Frozen result of [`compose`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    dependencies: DependencyMap,
    dev_dependencies: DependencyMap,
    applied: Vec<&'static str>,
}

impl Manifest {
    pub fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    pub fn dev_dependencies(&self) -> &DependencyMap {
        &self.dev_dependencies
    }

    /// Names of the rules whose predicate held, in application order.
    pub fn applied_rules(&self) -> &[&'static str] {
        &self.applied
    }
}

/// Start from the stack's mandatory packages and run every rule in order.
pub fn compose(
    base: &[(&str, &str)],
    base_dev: &[(&str, &str)],
    config: &ProjectConfig,
    rules: &[DependencyRule],
) -> Manifest {
    let mut manifest = Manifest::default();
    for (name, range) in base {
        manifest.dependencies.set(name, range);
    }
    for (name, range) in base_dev {
        manifest.dev_dependencies.set(name, range);
    }

    for rule in rules.iter().filter(|r| r.applies(config)) {
        let target = match rule.group {
            DepGroup::Runtime => &mut manifest.dependencies,
            DepGroup::Dev => &mut manifest.dev_dependencies,
        };
        for (name, range) in rule.packages {
            target.set(name, range);
        }
        manifest.applied.push(rule.name);
    }

    manifest
}

// ── Scripts ──────────────────────────────────────────────────────────────────

/// A candidate script: a command, or explicitly nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    Run(String),
    Absent,
}

impl Script {
    pub fn run(command: impl Into<String>) -> Self {
        Self::Run(command.into())
    }

    pub fn when(enabled: bool, command: impl Into<String>) -> Self {
        if enabled {
            Self::run(command)
        } else {
            Self::Absent
        }
    }
}

/// Emitted script map. Holds only real commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptTable {
    entries: Vec<(String, String)>,
}

impl ScriptTable {
    pub fn from_candidates<'a>(candidates: impl IntoIterator<Item = (&'a str, Script)>) -> Self {
        let mut table = Self::default();
        for (name, script) in candidates {
            let Script::Run(command) = script else {
                continue;
            };
            if command.trim().is_empty() {
                continue;
            }
            match table.entries.iter_mut().find(|(n, _)| n == name) {
                Some(entry) => entry.1 = command,
                None => table.entries.push((name.to_string(), command)),
            }
        }
        table
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ScriptTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, command) in &self.entries {
            map.serialize_entry(name, command)?;
        }
        map.end()
    }
}

// ── package.json ─────────────────────────────────────────────────────────────

/// `package.json` document. Field order here is emission order.
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exports: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Vec<String>>,
    #[serde(skip_serializing_if = "ScriptTable::is_empty")]
    pub scripts: ScriptTable,
    #[serde(skip_serializing_if = "DependencyMap::is_empty")]
    pub dependencies: DependencyMap,
    #[serde(skip_serializing_if = "DependencyMap::is_empty")]
    pub dev_dependencies: DependencyMap,
}

impl PackageJson {
    /// Common header fields taken from the config. Empty description and
    /// author are left out.
    pub fn for_project(config: &ProjectConfig) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            name: config.name().to_string(),
            version: Some(config.version().to_string()),
            description: non_empty(config.description()),
            author: non_empty(config.author()),
            license: Some(config.license().to_string()),
            ..Self::default()
        }
    }

    pub fn private(mut self) -> Self {
        self.private = Some(true);
        self
    }

    /// Mark the package as an ES module (`"type": "module"`).
    pub fn esm(mut self) -> Self {
        self.module_type = Some("module".into());
        self
    }

    pub fn with_manifest(mut self, manifest: &Manifest) -> Self {
        self.dependencies = manifest.dependencies().clone();
        self.dev_dependencies = manifest.dev_dependencies().clone();
        self
    }

    pub fn with_scripts(mut self, scripts: ScriptTable) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

// ── pyproject.toml ───────────────────────────────────────────────────────────

/// The `[project]` table of `pyproject.toml`. Table-valued fields come last
/// so the plain keys stay directly under `[project]`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PyProject {
    project: ProjectTable,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
struct ProjectTable {
    name: String,
    version: String,
    description: String,
    readme: &'static str,
    requires_python: String,
    dependencies: Vec<String>,
    license: LicenseText,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    authors: Vec<Person>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    optional_dependencies: BTreeMap<&'static str, Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    scripts: BTreeMap<String, String>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct LicenseText {
    text: String,
}

#[derive(Debug, Clone, serde::Serialize)]
struct Person {
    name: String,
}

impl PyProject {
    /// Runtime packages become `dependencies`, dev packages the `dev` extra.
    /// `entry_point` registers a console script named after the project.
    pub fn for_project(
        config: &ProjectConfig,
        manifest: &Manifest,
        entry_point: Option<&str>,
    ) -> Self {
        let requirements =
            |deps: &DependencyMap| deps.iter().map(|(n, r)| format!("{n}{r}")).collect::<Vec<_>>();

        let mut optional_dependencies = BTreeMap::new();
        if !manifest.dev_dependencies().is_empty() {
            optional_dependencies.insert("dev", requirements(manifest.dev_dependencies()));
        }

        let authors = if config.author().is_empty() {
            Vec::new()
        } else {
            vec![Person {
                name: config.author().to_string(),
            }]
        };

        Self {
            project: ProjectTable {
                name: config.name().to_string(),
                version: config.version().to_string(),
                description: config.description().to_string(),
                readme: "README.md",
                requires_python: format!(">={}", config.python_version()),
                dependencies: requirements(manifest.dependencies()),
                license: LicenseText {
                    text: config.license().to_string(),
                },
                authors,
                optional_dependencies,
                scripts: entry_point
                    .map(|target| (config.name().to_string(), target.to_string()))
                    .into_iter()
                    .collect(),
            },
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::project_config::RawProjectConfig;

    fn config(eslint: bool) -> ProjectConfig {
        let mut raw = RawProjectConfig::new("react", "demo");
        raw.eslint = Some(eslint);
        raw.normalize().unwrap()
    }

    static OVERRIDING: &[DependencyRule] = &[
        DependencyRule {
            name: "first",
            group: DepGroup::Dev,
            when: |_| true,
            packages: &[("typescript", "^5.0.0"), ("vite", "^5.0.0")],
        },
        DependencyRule {
            name: "skipped",
            group: DepGroup::Dev,
            when: |_| false,
            packages: &[("typescript", "^4.0.0")],
        },
        DependencyRule {
            name: "second",
            group: DepGroup::Dev,
            when: |c| c.toggles().eslint,
            packages: &[("typescript", "^5.3.0")],
        },
    ];

    #[test]
    fn later_rule_wins_and_keeps_position() {
        let manifest = compose(&[], &[("eslint", "^8.0.0")], &config(true), OVERRIDING);
        let dev = manifest.dev_dependencies();

        assert_eq!(dev.get("typescript"), Some("^5.3.0"));
        assert_eq!(
            dev.names().collect::<Vec<_>>(),
            vec!["eslint", "typescript", "vite"]
        );
        assert_eq!(manifest.applied_rules(), &["first", "second"]);
    }

    #[test]
    fn disabled_rule_leaves_earlier_value() {
        let manifest = compose(&[], &[], &config(false), OVERRIDING);
        assert_eq!(manifest.dev_dependencies().get("typescript"), Some("^5.0.0"));
        assert!(manifest.dependencies().is_empty());
    }

    #[test]
    fn rules_can_override_base_packages() {
        static RULES: &[DependencyRule] = &[DependencyRule {
            name: "pin-react",
            group: DepGroup::Runtime,
            when: |_| true,
            packages: &[("react", "^18.3.0")],
        }];
        let manifest = compose(&[("react", "^18.2.0")], &[], &config(true), RULES);
        assert_eq!(manifest.dependencies().get("react"), Some("^18.3.0"));
        assert_eq!(manifest.dependencies().len(), 1);
    }

    #[test]
    fn absent_scripts_are_filtered() {
        let table = ScriptTable::from_candidates([
            ("dev", Script::run("vite")),
            ("lint", Script::Absent),
            ("format", Script::when(false, "prettier --write src")),
            ("empty", Script::run("  ")),
            ("test", Script::when(true, "vitest")),
        ]);

        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["dev", "test"]);
        assert!(!table.contains_key("lint"));
    }

    #[test]
    fn package_json_keeps_construction_order() {
        let scripts = ScriptTable::from_candidates([
            ("zeta", Script::run("z")),
            ("alpha", Script::run("a")),
        ]);
        let json = PackageJson::for_project(&config(true))
            .with_scripts(scripts)
            .to_json()
            .unwrap();

        let zeta = json.find("\"zeta\"").unwrap();
        let alpha = json.find("\"alpha\"").unwrap();
        assert!(zeta < alpha);
        assert!(!json.contains("description"));
        assert!(!json.contains("dependencies"));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn requirements_lines() {
        let mut deps = DependencyMap::new();
        deps.set("fastapi", ">=0.109.0");
        deps.set("uvicorn[standard]", ">=0.25.0");
        assert_eq!(
            deps.to_requirements(),
            "fastapi>=0.109.0\nuvicorn[standard]>=0.25.0\n"
        );
    }

    fn python_config(edit: impl FnOnce(&mut RawProjectConfig)) -> ProjectConfig {
        let mut raw = RawProjectConfig::new("python", "data-kit");
        edit(&mut raw);
        raw.normalize().unwrap()
    }

    fn parse(text: &str) -> toml::Table {
        toml::from_str(text).unwrap_or_else(|e| panic!("{e}\n{text}"))
    }

    #[test]
    fn pyproject_escapes_user_text() {
        let config = python_config(|r| {
            r.description = Some("line one\nline \"two\" \\ 'three'\ttab".into());
            r.author = Some("O'Brien \"Bob\"".into());
        });
        let text = PyProject::for_project(&config, &Manifest::default(), None)
            .to_toml()
            .unwrap();

        let doc = parse(&text);
        let project = doc["project"].as_table().unwrap();
        assert_eq!(
            project["description"].as_str(),
            Some("line one\nline \"two\" \\ 'three'\ttab")
        );
        assert_eq!(
            project["authors"][0]["name"].as_str(),
            Some("O'Brien \"Bob\"")
        );
        assert_eq!(project["license"]["text"].as_str(), Some("MIT"));
        assert_eq!(project["requires-python"].as_str(), Some(">=3.12"));
    }

    #[test]
    fn pyproject_lists_requirements_in_rule_order() {
        let config = python_config(|_| {});
        let manifest = compose(
            &[("typer[all]", ">=0.9.0")],
            &[("pytest", ">=7.4.0"), ("ruff", ">=0.1.0")],
            &config,
            &[],
        );
        let text = PyProject::for_project(&config, &manifest, Some("data_kit.cli:app"))
            .to_toml()
            .unwrap();

        let doc = parse(&text);
        let project = doc["project"].as_table().unwrap();
        assert_eq!(project["dependencies"][0].as_str(), Some("typer[all]>=0.9.0"));
        let dev: Vec<_> = project["optional-dependencies"]["dev"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(toml::Value::as_str)
            .collect();
        assert_eq!(dev, vec!["pytest>=7.4.0", "ruff>=0.1.0"]);
        assert_eq!(project["scripts"]["data-kit"].as_str(), Some("data_kit.cli:app"));
        assert!(project.get("authors").is_none());
    }
}
