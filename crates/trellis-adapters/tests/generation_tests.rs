//! Full runs of the scaffold service with the built-in renderer.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use trellis_adapters::{BuiltinRenderer, LocalFilesystem, MemoryFilesystem};
use trellis_core::prelude::*;
use walkdir::WalkDir;

fn service(fs: impl Filesystem + 'static) -> ScaffoldService {
    ScaffoldService::new(Box::new(BuiltinRenderer::new()), Box::new(fs))
}

/// Free text that needs escaping in every structured format.
const AWKWARD_TEXT: &str = "Say \"hi\" to O'Brien\nC:\\tmp\ttabbed";

/// Every option switched on, so each conditional template is exercised.
fn kitchen_sink(ty: ProjectType, language: &str) -> ProjectConfig {
    kitchen_sink_named(ty, language, "kitchen-sink")
}

fn kitchen_sink_named(ty: ProjectType, language: &str, name: &str) -> ProjectConfig {
    let mut raw = RawProjectConfig::new(ty.as_str(), name);
    raw.language = Some(language.into());
    raw.description = Some(AWKWARD_TEXT.into());
    raw.author = Some(AWKWARD_TEXT.into());
    raw.docker = Some(true);
    raw.github_actions = Some(true);
    raw.css_framework = Some("tailwind".into());
    raw.database = Some("postgresql".into());
    raw.orm = Some(
        match ty {
            ProjectType::FastApi | ProjectType::Flask => "sqlalchemy",
            ProjectType::Django => "none",
            _ => "prisma",
        }
        .into(),
    );
    raw.features = Some(
        "zustand,redux,tanstack-query,react-router,nextauth,pinia,vue-router,zod,swagger,large-scale,jwt,celery,drf"
            .into(),
    );
    raw.normalize().unwrap()
}

fn minimal(ty: ProjectType, language: &str) -> ProjectConfig {
    let mut raw = RawProjectConfig::new(ty.as_str(), "bare");
    raw.language = Some(language.into());
    raw.eslint = Some(false);
    raw.prettier = Some(false);
    raw.testing = Some(false);
    raw.ruff = Some(false);
    raw.mypy = Some(false);
    raw.pytest = Some(false);
    raw.type_hints = Some(false);
    raw.typescript_strict = Some(false);
    raw.normalize().unwrap()
}

/// Any `{{UPPER_SNAKE}}` still present after rendering.
fn leftover_placeholder(text: &str) -> Option<&str> {
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        if let Some(end) = after.find("}}") {
            let key = &after[..end];
            if !key.is_empty()
                && key.starts_with(|c: char| c.is_ascii_uppercase())
                && key.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
            {
                return Some(key);
            }
        }
        rest = after;
    }
    None
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

fn is_json(path: &Path) -> bool {
    let name = file_name(path);
    name.ends_with(".json") || name == ".prettierrc"
}

fn is_toml(path: &Path) -> bool {
    file_name(path).ends_with(".toml")
}

fn check_plan(config: &ProjectConfig) {
    let fs = MemoryFilesystem::new();
    let report = service(fs.clone()).scaffold(config, "/work").unwrap();

    assert_eq!(fs.file_count(), report.plan.files().len());
    for file in report.plan.files() {
        let label = format!("{} {}", config.project_type(), file.path.display());
        assert!(
            leftover_placeholder(&file.content).is_none(),
            "{label}: unresolved placeholder"
        );
        if is_json(&file.path) {
            let parsed: Result<serde_json::Value, _> = serde_json::from_str(&file.content);
            assert!(parsed.is_ok(), "{label}: invalid JSON\n{}", file.content);
        }
        if is_toml(&file.path) {
            let parsed: Result<toml::Table, _> = toml::from_str(&file.content);
            assert!(parsed.is_ok(), "{label}: invalid TOML\n{}", file.content);
        }
        let written = fs.read_file(&report.root.join(&file.path)).unwrap();
        assert_eq!(written, file.content, "{label}");
    }
}

#[test]
fn every_stack_renders_with_all_options() {
    for ty in ProjectType::ALL {
        check_plan(&kitchen_sink(ty, "typescript"));
        check_plan(&kitchen_sink(ty, "javascript"));
    }
}

#[test]
fn every_stack_renders_with_tooling_off() {
    for ty in ProjectType::ALL {
        check_plan(&minimal(ty, "typescript"));
        check_plan(&minimal(ty, "javascript"));
    }
}

#[test]
fn python_cli_variant_renders() {
    check_plan(&kitchen_sink(ProjectType::Cli, "python"));
    check_plan(&minimal(ProjectType::Cli, "python"));
}

#[test]
fn quoted_project_name_keeps_manifests_valid() {
    for ty in ProjectType::ALL {
        check_plan(&kitchen_sink_named(ty, "typescript", "my\"app"));
    }
    check_plan(&kitchen_sink_named(ProjectType::Cli, "python", "my\"app"));
}

#[test]
fn user_text_round_trips_through_manifests() {
    let fs = MemoryFilesystem::new();
    let python = kitchen_sink(ProjectType::Python, "python");
    service(fs.clone()).scaffold(&python, "/py").unwrap();
    let text = fs
        .read_file(Path::new("/py/kitchen-sink/pyproject.toml"))
        .unwrap();
    let doc: toml::Table = toml::from_str(&text).unwrap();
    assert_eq!(doc["project"]["description"].as_str(), Some(AWKWARD_TEXT));
    assert_eq!(doc["project"]["authors"][0]["name"].as_str(), Some(AWKWARD_TEXT));

    let angular = kitchen_sink_named(ProjectType::Angular, "typescript", "my\"app");
    service(fs.clone()).scaffold(&angular, "/ng").unwrap();
    let text = fs.read_file(Path::new("/ng/my\"app/angular.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let project = &json["projects"]["my\"app"];
    assert_eq!(project["architect"]["build"]["options"]["outputPath"], "dist/my\"app");
    assert_eq!(
        project["architect"]["serve"]["configurations"]["production"]["buildTarget"],
        "my\"app:build:production"
    );

    let text = fs.read_file(Path::new("/ng/my\"app/package.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["description"], AWKWARD_TEXT);
}

#[test]
fn package_json_scripts_match_plan() {
    let fs = MemoryFilesystem::new();
    let config = kitchen_sink(ProjectType::NextJs, "typescript");
    let report = service(fs.clone()).scaffold(&config, "/work").unwrap();

    let text = fs.read_file(Path::new("/work/kitchen-sink/package.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let scripts = json["scripts"].as_object().unwrap();
    let names: Vec<&str> = scripts.keys().map(String::as_str).collect();
    let planned: Vec<&str> = report.plan.scripts().keys().collect();
    assert_eq!(names, planned);
    assert_eq!(json["name"], "kitchen-sink");
}

#[test]
fn description_with_braces_is_kept_verbatim() {
    let mut raw = RawProjectConfig::new("react", "braces");
    raw.description = Some("renders {{NAME}} literally".into());
    let fs = MemoryFilesystem::new();
    service(fs.clone())
        .scaffold(&raw.normalize().unwrap(), "/work")
        .unwrap();

    let readme = fs.read_file(Path::new("/work/braces/README.md")).unwrap();
    assert!(readme.contains("renders {{NAME}} literally"));
}

fn snapshot(root: &Path) -> BTreeMap<PathBuf, String> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read_to_string(e.path()).unwrap())
        })
        .collect()
}

#[test]
fn local_runs_are_byte_identical() {
    let temp = TempDir::new().unwrap();
    let config = kitchen_sink(ProjectType::FastApi, "python");
    let svc = service(LocalFilesystem::new());

    let a = svc.scaffold(&config, temp.path().join("a")).unwrap();
    let b = svc.scaffold(&config, temp.path().join("b")).unwrap();

    let tree = snapshot(&a.root);
    assert_eq!(tree.len(), a.plan.files().len());
    assert_eq!(tree, snapshot(&b.root));
    assert!(a.root.join("alembic/versions").is_dir());
}

#[test]
fn local_conflict_leaves_existing_directory_alone() {
    let temp = TempDir::new().unwrap();
    let existing = temp.path().join("site");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("keep.txt"), "mine").unwrap();

    let config = RawProjectConfig::new("html", "site").normalize().unwrap();
    let err = service(LocalFilesystem::new())
        .scaffold(&config, temp.path())
        .unwrap_err();

    assert!(err.is_preflight());
    assert_eq!(snapshot(&existing).len(), 1);
    assert_eq!(fs::read_to_string(existing.join("keep.txt")).unwrap(), "mine");
}

#[cfg(unix)]
#[test]
fn executables_get_the_exec_bit() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let config = RawProjectConfig::new("django", "blog").normalize().unwrap();
    service(LocalFilesystem::new())
        .scaffold(&config, temp.path())
        .unwrap();

    let mode = fs::metadata(temp.path().join("blog/manage.py"))
        .unwrap()
        .permissions()
        .mode();
    assert_ne!(mode & 0o111, 0);

    let settings = fs::read_to_string(temp.path().join("blog/blog/settings.py")).unwrap();
    assert!(settings.contains("ROOT_URLCONF = \"blog.urls\""));
}
