//! Integration tests for trellis-cli.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary isolated from the caller's config, colours and log filter.
fn trellis(home: &TempDir) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("trellis");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("TRELLIS_DEFAULTS__AUTHOR")
        .env_remove("TRELLIS_DEFAULTS__LICENSE");
    cmd
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("trellis"))
        .stdout(predicate::str::contains("new"));
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_new_command_help() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["new", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--typescript"))
        .stdout(predicate::str::contains("--no-eslint"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_react_typescript_tailwind() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["new", "react", "web", "--typescript", "--tailwind"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project created at"))
        .stdout(predicate::str::contains("Next steps:"))
        .stdout(predicate::str::contains("cd web"));

    let root = home.path().join("web");
    let pkg = read_json(&root.join("package.json"));
    for dep in ["tailwindcss", "postcss", "autoprefixer"] {
        assert!(pkg["devDependencies"][dep].is_string(), "missing {dep}");
    }
    assert!(pkg["scripts"]["lint"].is_string());
    assert!(root.join("tsconfig.json").is_file());
}

#[test]
fn test_no_eslint_drops_lint_script() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["new", "react", "web", "--no-eslint"])
        .assert()
        .success();

    let pkg = read_json(&home.path().join("web/package.json"));
    assert!(pkg["scripts"].get("lint").is_none());
    assert!(pkg["devDependencies"].get("eslint").is_none());
}

#[test]
fn test_output_dir_flag() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["new", "html", "site", "--output-dir", "projects/web"])
        .assert()
        .success();

    assert!(home.path().join("projects/web/site/index.html").is_file());
}

#[test]
fn test_python_stack_forces_python() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["new", "fastapi", "api", "--typescript"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pip install"));

    let root = home.path().join("api");
    assert!(root.join("requirements.txt").is_file());
    assert!(!root.join("package.json").exists());
}

#[test]
fn test_new_project_dry_run() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["new", "express", "api", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("package.json"))
        .stdout(predicate::str::contains("nothing written"));

    assert!(!home.path().join("api").exists());
}

#[test]
fn test_unknown_feature_is_reported() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["new", "express", "api", "--features", "graphql,pinia"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feature 'graphql' has no effect"))
        .stdout(predicate::str::contains("feature 'pinia' has no effect"));
}

#[test]
fn test_quiet_suppresses_stdout() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["-q", "new", "html", "site"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(home.path().join("site/index.html").is_file());
}

#[test]
fn test_list_formats() {
    let home = TempDir::new().unwrap();

    let out = trellis(&home)
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let rows: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 17);
    assert_eq!(rows[0]["type"], "html");

    trellis(&home)
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fastapi\n"))
        .stdout(predicate::str::contains("monorepo\n"));

    trellis(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available project types"));
}

#[test]
fn test_config_get_defaults_and_env() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["config", "get", "defaults.license"])
        .assert()
        .success()
        .stdout("MIT\n");

    trellis(&home)
        .args(["config", "get", "defaults.license"])
        .env("TRELLIS_DEFAULTS__LICENSE", "ISC")
        .assert()
        .success()
        .stdout("ISC\n");
}

#[test]
fn test_init_then_config_flows_into_new() {
    let home = TempDir::new().unwrap();
    let cfg = home.path().join("cfg/trellis.toml");
    let cfg_arg = cfg.to_str().unwrap();

    trellis(&home)
        .args(["init", "-c", cfg_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));
    assert!(cfg.is_file());

    let text = fs::read_to_string(&cfg).unwrap();
    fs::write(&cfg, text.replace("[defaults]", "[defaults]\nauthor = \"Grace Hopper\"")).unwrap();

    trellis(&home)
        .args(["config", "list", "-c", cfg_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("author = \"Grace Hopper\""));

    trellis(&home)
        .args(["-c", cfg_arg, "new", "python", "lib"])
        .assert()
        .success();
    let readme = fs::read_to_string(home.path().join("lib/README.md")).unwrap();
    assert!(readme.contains("Grace Hopper"));
}

#[test]
fn test_init_local_writes_cwd_file() {
    let home = TempDir::new().unwrap();
    trellis(&home).args(["init", "--local"]).assert().success();
    assert!(home.path().join(".trellis.toml").is_file());

    trellis(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(".trellis.toml\n");
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trellis"));
}
