//! Tests for error handling: exit codes, one-line messages, suggestions.

use std::fs;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn trellis(home: &TempDir) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("trellis");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn single_line() -> impl Predicate<str> {
    predicate::function(|s: &str| s.lines().count() == 1)
}

#[test]
fn test_unknown_project_type() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["new", "unknown-stack", "app"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown project type 'unknown-stack'"))
        .stderr(single_line());

    assert!(!home.path().join("app").exists());
}

#[test]
fn test_directory_conflict_writes_nothing() {
    let home = TempDir::new().unwrap();
    let existing = home.path().join("lib");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("keep.txt"), "mine").unwrap();

    trellis(&home)
        .args(["new", "python", "lib"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"))
        .stderr(single_line());

    let entries: Vec<_> = fs::read_dir(&existing).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(fs::read_to_string(existing.join("keep.txt")).unwrap(), "mine");
}

#[test]
fn test_verbose_adds_suggestions() {
    let home = TempDir::new().unwrap();
    fs::create_dir(home.path().join("lib")).unwrap();

    trellis(&home)
        .args(["-v", "new", "python", "lib"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Suggestions:"))
        .stderr(predicate::str::contains("--output-dir"));
}

#[test]
fn test_invalid_project_name() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["new", "react", ".."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid config: name"))
        .stderr(single_line());
}

#[test]
fn test_invalid_package_manager() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["new", "react", "web", "--package-manager", "maven"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("maven"));

    assert!(!home.path().join("web").exists());
}

#[test]
fn test_argument_errors_exit_one() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["new", "react"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error:"))
        .stderr(single_line());

    trellis(&home)
        .args(["new", "express", "api", "--database", "oracle"])
        .assert()
        .code(1)
        .stderr(single_line());

    trellis(&home)
        .args(["new", "react", "web", "--typescript", "--javascript"])
        .assert()
        .code(1);
}

#[test]
fn test_unknown_config_key() {
    let home = TempDir::new().unwrap();
    trellis(&home)
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown config key 'defaults.lang'"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    let cfg = home.path().join("trellis.toml");
    fs::write(&cfg, "[defaults]\nauthor = \"me\"\n").unwrap();
    let cfg_arg = cfg.to_str().unwrap();

    trellis(&home)
        .args(["init", "-c", cfg_arg])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
    assert!(fs::read_to_string(&cfg).unwrap().contains("me"));

    trellis(&home)
        .args(["init", "--force", "-c", cfg_arg])
        .assert()
        .success();
}

#[test]
fn test_malformed_config_file() {
    let home = TempDir::new().unwrap();
    let cfg = home.path().join("broken.toml");
    fs::write(&cfg, "[defaults\nauthor = ").unwrap();

    trellis(&home)
        .args(["-c", cfg.to_str().unwrap(), "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration error"))
        .stderr(single_line());
}
