//! Command-line tools. Node CLIs use commander; choosing the Python
//! language produces a Typer app installed through `[project.scripts]`.

use serde_json::json;
use tracing::instrument;

use super::common::{
    eslint_ts, lint_configs, mypy, node_common, node_next_steps, pytest, python_common,
    python_next_steps, ruff, testing, ts, PlanBuilder, PythonInstall, TS_ESLINT_PACKAGES,
};
use super::Generator;
use crate::{
    application::ports::TemplateRenderer,
    domain::{
        compose, DepGroup, DependencyRule, GenerationPlan, PackageJson, ProjectConfig,
        ProjectType, Script, ScriptTable, TemplateId,
    },
    error::TrellisResult,
};

const NODE_BASE: &[(&str, &str)] = &[
    ("commander", "^11.1.0"),
    ("chalk", "^5.3.0"),
    ("ora", "^8.0.0"),
];

static NODE_RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "typescript",
        group: DepGroup::Dev,
        when: ts,
        packages: &[
            ("typescript", "^5.3.0"),
            ("@types/node", "^22.0.0"),
            ("tsup", "^8.0.0"),
        ],
    },
    DependencyRule {
        name: "eslint",
        group: DepGroup::Dev,
        when: super::common::eslint,
        packages: &[("eslint", "^8.56.0")],
    },
    DependencyRule {
        name: "eslint-typescript",
        group: DepGroup::Dev,
        when: eslint_ts,
        packages: TS_ESLINT_PACKAGES,
    },
    DependencyRule {
        name: "prettier",
        group: DepGroup::Dev,
        when: super::common::prettier,
        packages: &[("prettier", "^3.1.0")],
    },
    DependencyRule {
        name: "testing",
        group: DepGroup::Dev,
        when: testing,
        packages: &[("vitest", "^1.0.0")],
    },
];

const PYTHON_BASE: &[(&str, &str)] = &[("typer[all]", ">=0.9.0"), ("rich", ">=13.7.0")];

static PYTHON_RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "pytest",
        group: DepGroup::Dev,
        when: pytest,
        packages: &[("pytest", ">=7.4.0")],
    },
    DependencyRule {
        name: "ruff",
        group: DepGroup::Dev,
        when: ruff,
        packages: &[("ruff", ">=0.1.0")],
    },
    DependencyRule {
        name: "mypy",
        group: DepGroup::Dev,
        when: mypy,
        packages: &[("mypy", ">=1.8.0")],
    },
];

pub(crate) struct CliGenerator;

impl Generator for CliGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::Cli
    }

    fn description(&self) -> &'static str {
        "Command-line tool (commander, or Typer with --language python)"
    }

    #[instrument(skip_all, fields(project = %config.name(), language = %config.language()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        if config.is_python() {
            python_cli(config, renderer)
        } else {
            node_cli(config, renderer)
        }
    }
}

fn node_cli(config: &ProjectConfig, renderer: &dyn TemplateRenderer) -> TrellisResult<GenerationPlan> {
    let manifest = compose(NODE_BASE, &[], config, NODE_RULES);
    let t = config.toggles();
    let ts = config.is_typescript();
    let bin_path = if ts { "./dist/index.js" } else { "./bin/index.js" };

    let scripts = ScriptTable::from_candidates([
        ("build", Script::when(ts, "tsup src/index.ts --format esm --clean")),
        ("dev", Script::when(ts, "tsup src/index.ts --format esm --watch")),
        ("start", Script::run(format!("node {bin_path}"))),
        ("lint", Script::when(t.eslint, "eslint .")),
        ("format", Script::when(t.prettier, "prettier --write .")),
        ("test", Script::when(t.testing, "vitest")),
    ]);
    let steps = node_next_steps(config, &scripts);

    let mut package = PackageJson::for_project(config).esm();
    package.bin = Some(json!({ config.name(): bin_path }));
    package.files = Some(vec![if ts { "dist" } else { "bin" }.into()]);

    let mut b = PlanBuilder::new(config, renderer);
    b.package_json(package, manifest, scripts)?;
    if ts {
        b.render("src/index.ts", TemplateId::NodeCliIndex)?
            .render("tsconfig.json", TemplateId::TsConfig)?;
    } else {
        b.render_executable("bin/index.js", TemplateId::NodeCliIndex)?;
    }

    lint_configs(&mut b)?;
    node_common(&mut b)?;
    Ok(b.finish(steps))
}

fn python_cli(config: &ProjectConfig, renderer: &dyn TemplateRenderer) -> TrellisResult<GenerationPlan> {
    let manifest = compose(PYTHON_BASE, &[], config, PYTHON_RULES);
    let module = config.module_name();
    let entry_point = format!("{module}.cli:app");
    let launch = format!("{} --help", config.name());
    let steps = python_next_steps(config, PythonInstall::Editable, &[launch.as_str()]);
    let t = config.toggles();

    let mut b = PlanBuilder::new(config, renderer);
    b.pyproject(manifest, Some(&entry_point))?
        .render(format!("src/{module}/__init__.py"), TemplateId::PythonPackageInit)?
        .render(format!("src/{module}/cli.py"), TemplateId::PythonCliMain)?;
    if t.type_hints {
        b.text(format!("src/{module}/py.typed"), String::new());
    }
    if t.pytest {
        b.text("tests/__init__.py", String::new())
            .render("tests/test_cli.py", TemplateId::PythonCliTest)?;
    }

    python_common(&mut b)?;
    Ok(b.finish(steps))
}
