//! Pieces shared by every generator: the plan builder, predicate helpers
//! used in rule tables, shared tooling files and next-step hints.

use std::path::PathBuf;

use tracing::debug;

use crate::{
    application::{ports::TemplateRenderer, ApplicationError},
    domain::{
        GenerationPlan, Manifest, PackageJson, PackageManager, ProjectConfig, PyProject,
        ScriptTable, TemplateId,
    },
    error::TrellisResult,
};

// ── Predicates for rule tables ───────────────────────────────────────────────

pub(crate) fn ts(c: &ProjectConfig) -> bool {
    c.is_typescript()
}

pub(crate) fn js(c: &ProjectConfig) -> bool {
    !c.is_typescript()
}

pub(crate) fn tailwind(c: &ProjectConfig) -> bool {
    c.uses_tailwind()
}

pub(crate) fn eslint(c: &ProjectConfig) -> bool {
    c.toggles().eslint
}

pub(crate) fn eslint_ts(c: &ProjectConfig) -> bool {
    c.toggles().eslint && c.is_typescript()
}

pub(crate) fn prettier(c: &ProjectConfig) -> bool {
    c.toggles().prettier
}

pub(crate) fn testing(c: &ProjectConfig) -> bool {
    c.toggles().testing
}

pub(crate) fn pytest(c: &ProjectConfig) -> bool {
    c.toggles().pytest
}

pub(crate) fn ruff(c: &ProjectConfig) -> bool {
    c.toggles().ruff
}

pub(crate) fn mypy(c: &ProjectConfig) -> bool {
    c.toggles().mypy
}

pub(crate) const TAILWIND_PACKAGES: &[(&str, &str)] = &[
    ("tailwindcss", "^3.4.0"),
    ("postcss", "^8.4.0"),
    ("autoprefixer", "^10.4.0"),
];

pub(crate) const TS_ESLINT_PACKAGES: &[(&str, &str)] = &[
    ("@typescript-eslint/eslint-plugin", "^6.0.0"),
    ("@typescript-eslint/parser", "^6.0.0"),
];

// ── Plan builder ─────────────────────────────────────────────────────────────

/// Accumulates files for one generation, rendering through the port.
pub(crate) struct PlanBuilder<'a> {
    config: &'a ProjectConfig,
    renderer: &'a dyn TemplateRenderer,
    plan: GenerationPlan,
}

impl<'a> PlanBuilder<'a> {
    pub(crate) fn new(config: &'a ProjectConfig, renderer: &'a dyn TemplateRenderer) -> Self {
        Self {
            config,
            renderer,
            plan: GenerationPlan::new(),
        }
    }

    pub(crate) fn config(&self) -> &'a ProjectConfig {
        self.config
    }

    /// `ts` / `js` / `py`.
    pub(crate) fn ext(&self) -> &'static str {
        self.config.language().script_extension()
    }

    /// `tsx` / `jsx`.
    pub(crate) fn jsx(&self) -> &'static str {
        self.config.language().component_extension()
    }

    pub(crate) fn dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.plan.add_directory(path.into());
        self
    }

    pub(crate) fn render(
        &mut self,
        path: impl Into<PathBuf>,
        id: TemplateId,
    ) -> TrellisResult<&mut Self> {
        let content = self.renderer.render(id, self.config)?;
        self.plan.add_file(path, content);
        Ok(self)
    }

    pub(crate) fn render_if(
        &mut self,
        enabled: bool,
        path: impl Into<PathBuf>,
        id: TemplateId,
    ) -> TrellisResult<&mut Self> {
        if enabled {
            self.render(path, id)?;
        }
        Ok(self)
    }

    pub(crate) fn render_executable(
        &mut self,
        path: impl Into<PathBuf>,
        id: TemplateId,
    ) -> TrellisResult<&mut Self> {
        let content = self.renderer.render(id, self.config)?;
        self.plan.add_executable(path, content);
        Ok(self)
    }

    pub(crate) fn text(&mut self, path: impl Into<PathBuf>, content: String) -> &mut Self {
        self.plan.add_file(path, content);
        self
    }

    /// Write `package.json` and attach the manifest and scripts to the plan.
    pub(crate) fn package_json(
        &mut self,
        package: PackageJson,
        manifest: Manifest,
        scripts: ScriptTable,
    ) -> TrellisResult<&mut Self> {
        let json = package
            .with_manifest(&manifest)
            .with_scripts(scripts.clone())
            .to_json()
            .map_err(|e| ApplicationError::RenderingFailed {
                template: "package-json",
                reason: e.to_string(),
            })?;
        self.plan.add_file("package.json", json);
        self.attach(manifest, scripts);
        Ok(self)
    }

    /// Write `requirements.txt`, and `requirements-dev.txt` when the dev
    /// group is non-empty.
    pub(crate) fn requirements(&mut self, manifest: Manifest) -> &mut Self {
        self.plan
            .add_file("requirements.txt", manifest.dependencies().to_requirements());
        if !manifest.dev_dependencies().is_empty() {
            let dev = format!(
                "-r requirements.txt\n{}",
                manifest.dev_dependencies().to_requirements()
            );
            self.plan.add_file("requirements-dev.txt", dev);
        }
        self.attach(manifest, ScriptTable::default());
        self
    }

    /// Write `pyproject.toml`: a `[project]` table built from the manifest
    /// followed by the rendered build and tool sections.
    pub(crate) fn pyproject(
        &mut self,
        manifest: Manifest,
        entry_point: Option<&str>,
    ) -> TrellisResult<&mut Self> {
        let project = PyProject::for_project(self.config, &manifest, entry_point)
            .to_toml()
            .map_err(|e| ApplicationError::RenderingFailed {
                template: "pyproject",
                reason: e.to_string(),
            })?;
        let tools = self.renderer.render(TemplateId::Pyproject, self.config)?;
        let text = format!("{project}\n{tools}");
        self.plan.add_file("pyproject.toml", text);
        self.attach(manifest, ScriptTable::default());
        Ok(self)
    }

    pub(crate) fn attach(&mut self, manifest: Manifest, scripts: ScriptTable) {
        for rule in manifest.applied_rules() {
            debug!(rule, "dependency rule applied");
        }
        self.plan.set_manifest(manifest);
        self.plan.set_scripts(scripts);
    }

    pub(crate) fn finish(mut self, next_steps: Vec<String>) -> GenerationPlan {
        self.plan.set_next_steps(next_steps);
        self.plan
    }
}

// ── Shared files ─────────────────────────────────────────────────────────────

/// `.gitignore`, `.env.example`, `README.md` and toggle-driven tooling for
/// Node stacks.
pub(crate) fn node_common(b: &mut PlanBuilder<'_>) -> TrellisResult<()> {
    b.render(".gitignore", TemplateId::GitignoreNode)?
        .render(".env.example", TemplateId::EnvExampleNode)?
        .render("README.md", TemplateId::Readme)?;

    let t = b.config().toggles();
    b.render_if(t.eslint || t.prettier, ".vscode/settings.json", TemplateId::VscodeSettings)?;
    ci_and_docker(b)
}

/// Python counterpart of [`node_common`].
pub(crate) fn python_common(b: &mut PlanBuilder<'_>) -> TrellisResult<()> {
    b.render(".gitignore", TemplateId::GitignorePython)?
        .render(".env.example", TemplateId::EnvExamplePython)?
        .render("README.md", TemplateId::Readme)?;

    let t = b.config().toggles();
    b.render_if(t.ruff, "ruff.toml", TemplateId::RuffConfig)?
        .render_if(t.ruff || t.mypy, ".vscode/settings.json", TemplateId::VscodeSettings)?;
    ci_and_docker(b)
}

fn ci_and_docker(b: &mut PlanBuilder<'_>) -> TrellisResult<()> {
    let t = b.config().toggles();
    b.render_if(t.github_actions, ".github/workflows/ci.yml", TemplateId::CiWorkflow)?;
    if t.docker {
        b.render("Dockerfile", TemplateId::Dockerfile)?
            .render(".dockerignore", TemplateId::Dockerignore)?
            .render("docker-compose.yml", TemplateId::DockerCompose)?;
    }
    Ok(())
}

/// `.eslintrc.json` and `.prettierrc` per toggle.
pub(crate) fn lint_configs(b: &mut PlanBuilder<'_>) -> TrellisResult<()> {
    let t = b.config().toggles();
    b.render_if(t.eslint, ".eslintrc.json", TemplateId::EslintConfig)?
        .render_if(t.prettier, ".prettierrc", TemplateId::PrettierConfig)?;
    Ok(())
}

/// `tailwind.config.js` and `postcss.config.js`.
pub(crate) fn tailwind_configs(b: &mut PlanBuilder<'_>) -> TrellisResult<()> {
    if b.config().uses_tailwind() {
        b.render("tailwind.config.js", TemplateId::TailwindConfig)?
            .render("postcss.config.js", TemplateId::PostcssConfig)?;
    }
    Ok(())
}

// ── Next steps ───────────────────────────────────────────────────────────────

fn run(pm: PackageManager, script: &str) -> String {
    match (pm, script) {
        (PackageManager::Npm, "start" | "test") => format!("npm {script}"),
        (PackageManager::Npm, _) => format!("npm run {script}"),
        (pm, _) => format!("{pm} {script}"),
    }
}

/// `cd`, install, then the first of `dev`, `start:dev`, `start` present.
pub(crate) fn node_next_steps(config: &ProjectConfig, scripts: &ScriptTable) -> Vec<String> {
    let pm = if config.package_manager().is_node() {
        config.package_manager()
    } else {
        PackageManager::Npm
    };

    let mut steps = vec![format!("cd {}", config.name()), format!("{pm} install")];
    if scripts.contains_key("db:generate") {
        steps.push(run(pm, "db:generate"));
    }
    if let Some(script) = ["dev", "start:dev", "start"]
        .into_iter()
        .find(|s| scripts.contains_key(s))
    {
        steps.push(run(pm, script));
    }
    steps
}

/// How a Python project gets its packages installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PythonInstall {
    Requirements { dev: bool },
    Editable,
}

pub(crate) fn python_next_steps(
    config: &ProjectConfig,
    install: PythonInstall,
    launch: &[&str],
) -> Vec<String> {
    let mut steps = vec![format!("cd {}", config.name())];

    match (config.package_manager(), install) {
        (PackageManager::Poetry, PythonInstall::Editable) => {
            steps.push("poetry install".into());
        }
        (PackageManager::Pipenv, PythonInstall::Requirements { .. }) => {
            steps.push("pipenv install -r requirements.txt".into());
        }
        (_, install) => {
            steps.push("python -m venv .venv".into());
            steps.push("source .venv/bin/activate".into());
            steps.push(match install {
                PythonInstall::Requirements { dev: true } => {
                    "pip install -r requirements-dev.txt".into()
                }
                PythonInstall::Requirements { dev: false } => {
                    "pip install -r requirements.txt".into()
                }
                PythonInstall::Editable => "pip install -e \".[dev]\"".into(),
            });
        }
    }

    steps.extend(launch.iter().map(|s| s.to_string()));
    steps
}
