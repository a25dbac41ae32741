use tracing::instrument;

use super::common::{
    mypy, pytest, python_common, python_next_steps, ruff, PlanBuilder, PythonInstall,
};
use super::Generator;
use crate::{
    application::ports::TemplateRenderer,
    domain::{
        compose, Database, DepGroup, DependencyRule, FeatureTag, GenerationPlan, Orm,
        ProjectConfig, ProjectType, TemplateId,
    },
    error::TrellisResult,
};

const BASE: &[(&str, &str)] = &[("flask", ">=3.0.0"), ("python-dotenv", ">=1.0.0")];

static RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "sqlalchemy",
        group: DepGroup::Runtime,
        when: |c| c.orm() == Orm::SqlAlchemy,
        packages: &[("flask-sqlalchemy", ">=3.1.0"), ("flask-migrate", ">=4.0.0")],
    },
    DependencyRule {
        name: "postgresql",
        group: DepGroup::Runtime,
        when: |c| c.database() == Database::Postgresql,
        packages: &[("psycopg2-binary", ">=2.9.0")],
    },
    DependencyRule {
        name: "mysql",
        group: DepGroup::Runtime,
        when: |c| c.database() == Database::Mysql,
        packages: &[("pymysql", ">=1.1.0")],
    },
    DependencyRule {
        name: "jwt",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::Jwt),
        packages: &[("flask-jwt-extended", ">=4.6.0")],
    },
    DependencyRule {
        name: "celery",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::Celery),
        packages: &[("celery", ">=5.3.0"), ("redis", ">=5.0.0")],
    },
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

/// Flask app built around an application factory.
pub(crate) struct FlaskGenerator;

impl Generator for FlaskGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::Flask
    }

    fn description(&self) -> &'static str {
        "Flask app with an application factory"
    }

    fn recognized_features(&self) -> &'static [FeatureTag] {
        &[FeatureTag::Jwt, FeatureTag::Celery]
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(BASE, &[], config, RULES);
        let install = PythonInstall::Requirements {
            dev: !manifest.dev_dependencies().is_empty(),
        };
        let steps = python_next_steps(config, install, &["flask --app wsgi run --debug"]);
        let t = config.toggles();

        let mut b = PlanBuilder::new(config, renderer);
        b.dir("app/templates").dir("app/static");
        b.requirements(manifest)
            .render("app/__init__.py", TemplateId::FlaskFactory)?
            .render("app/routes.py", TemplateId::FlaskRoutes)?
            .render("config.py", TemplateId::FlaskConfig)?
            .render("wsgi.py", TemplateId::FlaskWsgi)?;

        if t.pytest {
            b.text("tests/__init__.py", String::new())
                .render("tests/test_app.py", TemplateId::FlaskTest)?;
        }
        b.render_if(t.pytest || t.mypy, "pyproject.toml", TemplateId::Pyproject)?;

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
        let mut raw = RawProjectConfig::new("flask", "web");
        edit(&mut raw);
        FlaskGenerator
            .generate(&raw.normalize().unwrap(), &renderer)
            .unwrap()
    }

    #[test]
    fn factory_layout() {
        let plan = plan(|_| {});
        assert_eq!(plan.file("app/__init__.py").unwrap().content, "flask-factory");
        assert!(plan.has_file("wsgi.py"));
        assert!(plan.has_file("tests/test_app.py"));
        assert_eq!(
            plan.next_steps().last().map(String::as_str),
            Some("flask --app wsgi run --debug")
        );
    }

    #[test]
    fn sqlalchemy_on_postgres() {
        let plan = plan(|r| {
            r.orm = Some("sqlalchemy".into());
            r.database = Some("postgresql".into());
        });
        let deps = plan.manifest().dependencies();
        assert!(deps.contains("flask-migrate"));
        assert!(deps.contains("psycopg2-binary"));
    }

    #[test]
    fn requirements_list_every_runtime_package() {
        let plan = plan(|r| r.features = Some("jwt".into()));
        let requirements = &plan.file("requirements.txt").unwrap().content;
        assert!(requirements.contains("flask>=3.0.0\n"));
        assert!(requirements.contains("flask-jwt-extended>=4.6.0\n"));
    }
}
