//! End-to-end runs of the scaffold service over in-test port implementations.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use trellis_core::application::ApplicationError;
use trellis_core::domain::DomainError;
use trellis_core::prelude::*;

/// Renders every template as its id plus the project name placeholder.
struct EchoRenderer;

impl TemplateRenderer for EchoRenderer {
    fn render(&self, id: TemplateId, config: &ProjectConfig) -> TrellisResult<String> {
        let ctx = RenderContext::from_config(config);
        Ok(ctx.render(id, &format!("{id} for {{{{PROJECT_NAME}}}}\n"))?)
    }
}

#[derive(Default)]
struct State {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    executables: BTreeSet<PathBuf>,
    writes: usize,
}

#[derive(Clone, Default)]
struct RecordingFs(Arc<Mutex<State>>);

impl RecordingFs {
    fn with_dir(path: &str) -> Self {
        let fs = Self::default();
        fs.0.lock().unwrap().dirs.insert(PathBuf::from(path));
        fs
    }

    fn writes(&self) -> usize {
        self.0.lock().unwrap().writes
    }

    /// Files under `root`, keyed by relative path.
    fn tree(&self, root: &str) -> BTreeMap<PathBuf, String> {
        self.0
            .lock()
            .unwrap()
            .files
            .iter()
            .filter_map(|(p, c)| {
                p.strip_prefix(root)
                    .ok()
                    .map(|rel| (rel.to_path_buf(), c.clone()))
            })
            .collect()
    }
}

impl Filesystem for RecordingFs {
    fn create_dir_all(&self, path: &Path) -> TrellisResult<()> {
        let mut state = self.0.lock().unwrap();
        state.writes += 1;
        state.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> TrellisResult<()> {
        let mut state = self.0.lock().unwrap();
        if state.dirs.contains(path) || state.files.contains_key(path) {
            return Err(ApplicationError::DirectoryConflict {
                path: path.to_path_buf(),
            }
            .into());
        }
        state.writes += 1;
        state.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> TrellisResult<()> {
        let mut state = self.0.lock().unwrap();
        state.writes += 1;
        state.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> TrellisResult<()> {
        let mut state = self.0.lock().unwrap();
        if executable {
            state.executables.insert(path.to_path_buf());
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.0.lock().unwrap();
        state.dirs.contains(path) || state.files.contains_key(path)
    }

    fn remove_dir_all(&self, path: &Path) -> TrellisResult<()> {
        let mut state = self.0.lock().unwrap();
        state.dirs.retain(|d| !d.starts_with(path));
        state.files.retain(|f, _| !f.starts_with(path));
        Ok(())
    }
}

fn service(fs: &RecordingFs) -> ScaffoldService {
    ScaffoldService::new(Box::new(EchoRenderer), Box::new(fs.clone()))
}

fn package_json(fs: &RecordingFs, root: &str) -> serde_json::Value {
    let text = fs.tree(root).remove(Path::new("package.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn react_typescript_tailwind_pulls_css_toolchain() {
    let mut raw = RawProjectConfig::new("react", "web");
    raw.language = Some("typescript".into());
    raw.css_framework = Some("tailwind".into());
    let fs = RecordingFs::default();

    service(&fs).scaffold(&raw.normalize().unwrap(), "/out").unwrap();

    let json = package_json(&fs, "/out/web");
    for dep in ["tailwindcss", "postcss", "autoprefixer"] {
        assert!(json["devDependencies"][dep].is_string(), "{dep}");
    }
    assert!(json["scripts"]["lint"].is_string());
    assert!(fs.tree("/out/web").contains_key(Path::new("tailwind.config.js")));
}

#[test]
fn react_without_eslint_has_no_lint_script() {
    let mut raw = RawProjectConfig::new("react", "web");
    raw.eslint = Some(false);
    let fs = RecordingFs::default();

    service(&fs).scaffold(&raw.normalize().unwrap(), "/out").unwrap();

    let json = package_json(&fs, "/out/web");
    assert!(json["scripts"].get("lint").is_none());
    assert!(json["devDependencies"].get("eslint").is_none());
}

#[test]
fn existing_python_target_writes_nothing() {
    let fs = RecordingFs::with_dir("/out/X");
    let config = RawProjectConfig::new("python", "X").normalize().unwrap();

    let err = service(&fs).scaffold(&config, "/out").unwrap_err();

    assert!(matches!(
        err,
        TrellisError::Application(ApplicationError::DirectoryConflict { .. })
    ));
    assert_eq!(fs.writes(), 0);
}

#[test]
fn unknown_stack_is_rejected_at_normalization() {
    let err = RawProjectConfig::new("unknown-stack", "x")
        .normalize()
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::UnknownProjectType {
            project_type: "unknown-stack".into()
        }
    );
}

#[test]
fn two_runs_produce_identical_trees() {
    let fs = RecordingFs::default();
    let mut raw = RawProjectConfig::new("fastapi", "svc");
    raw.orm = Some("sqlalchemy".into());
    raw.database = Some("postgresql".into());
    raw.docker = Some(true);
    let config = raw.normalize().unwrap();

    let svc = service(&fs);
    svc.scaffold(&config, "/a").unwrap();
    svc.scaffold(&config, "/b").unwrap();

    let a = fs.tree("/a/svc");
    assert!(!a.is_empty());
    assert_eq!(a, fs.tree("/b/svc"));
}

#[test]
fn placeholders_resolve_to_the_project_name() {
    let fs = RecordingFs::default();
    let config = RawProjectConfig::new("django", "blog").normalize().unwrap();

    service(&fs).scaffold(&config, "/srv").unwrap();

    let tree = fs.tree("/srv/blog");
    assert_eq!(tree[Path::new("blog/urls.py")], "django-urls for blog\n");
    assert!(fs
        .0
        .lock()
        .unwrap()
        .executables
        .contains(Path::new("/srv/blog/manage.py")));
}

#[test]
fn requirements_follow_rule_order() {
    let fs = RecordingFs::default();
    let mut raw = RawProjectConfig::new("flask", "api");
    raw.orm = Some("sqlalchemy".into());
    let config = raw.normalize().unwrap();

    service(&fs).scaffold(&config, "/out").unwrap();

    let tree = fs.tree("/out/api");
    assert_eq!(
        tree[Path::new("requirements.txt")],
        "flask>=3.0.0\npython-dotenv>=1.0.0\nflask-sqlalchemy>=3.1.0\nflask-migrate>=4.0.0\n"
    );
    assert!(tree[Path::new("requirements-dev.txt")].starts_with("-r requirements.txt\n"));
}
