use tracing::instrument;

use super::common::{
    mypy, pytest, python_common, python_next_steps, ruff, PlanBuilder, PythonInstall,
};
use super::Generator;
use crate::{
    application::ports::TemplateRenderer,
    domain::{
        compose, DepGroup, DependencyRule, GenerationPlan, ProjectConfig, ProjectType,
        TemplateId,
    },
    error::TrellisResult,
};

static RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "pytest",
        group: DepGroup::Dev,
        when: pytest,
        packages: &[("pytest", ">=7.4.0"), ("pytest-cov", ">=4.1.0")],
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

/// Installable Python package in the `src/` layout.
pub(crate) struct PythonLibGenerator;

impl Generator for PythonLibGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::Python
    }

    fn description(&self) -> &'static str {
        "Python library (src layout, pyproject.toml)"
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(&[], &[], config, RULES);
        let t = config.toggles();
        let launch: &[&str] = if t.pytest { &["pytest"] } else { &[] };
        let steps = python_next_steps(config, PythonInstall::Editable, launch);
        let module = config.module_name();

        let mut b = PlanBuilder::new(config, renderer);
        b.pyproject(manifest, None)?
            .render(format!("src/{module}/__init__.py"), TemplateId::PythonPackageInit)?
            .render(format!("src/{module}/core.py"), TemplateId::PythonLibCore)?;
        if t.type_hints {
            b.text(format!("src/{module}/py.typed"), String::new());
        }
        if t.pytest {
            b.text("tests/__init__.py", String::new())
                .render("tests/test_core.py", TemplateId::PythonLibTest)?;
        }

        python_common(&mut b)?;
        Ok(b.finish(steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockTemplateRenderer;
    use crate::domain::RawProjectConfig;

    fn plan(edit: impl FnOnce(&mut RawProjectConfig)) -> GenerationPlan {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|id, _| Ok(id.to_string()));
        let mut raw = RawProjectConfig::new("python", "data-kit");
        edit(&mut raw);
        PythonLibGenerator
            .generate(&raw.normalize().unwrap(), &renderer)
            .unwrap()
    }

    #[test]
    fn src_layout_uses_module_name() {
        let plan = plan(|_| {});
        assert!(plan.has_file("src/data_kit/__init__.py"));
        assert!(plan.has_file("src/data_kit/core.py"));
        assert!(plan.has_file("src/data_kit/py.typed"));
        assert!(!plan.has_file("requirements.txt"));
    }

    #[test]
    fn pyproject_lists_dev_extras() {
        let plan = plan(|r| r.description = Some("Tools for \"data\"".into()));
        let text = &plan.file("pyproject.toml").unwrap().content;
        let project_part = text.strip_suffix("\npyproject").unwrap();
        let doc: toml::Table = toml::from_str(project_part).unwrap();
        let project = &doc["project"];

        assert_eq!(project["name"].as_str(), Some("data-kit"));
        assert_eq!(project["description"].as_str(), Some("Tools for \"data\""));
        assert!(project["dependencies"].as_array().unwrap().is_empty());
        assert_eq!(
            project["optional-dependencies"]["dev"][0].as_str(),
            Some("pytest>=7.4.0")
        );
    }

    #[test]
    fn editable_install_then_tests() {
        let plan = plan(|_| {});
        assert_eq!(plan.next_steps().last().map(String::as_str), Some("pytest"));
        assert!(plan
            .next_steps()
            .contains(&"pip install -e \".[dev]\"".to_string()));
    }

    #[test]
    fn no_type_marker_without_hints() {
        let plan = plan(|r| r.type_hints = Some(false));
        assert!(!plan.has_file("src/data_kit/py.typed"));
    }
}
