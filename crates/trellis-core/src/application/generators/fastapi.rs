//! FastAPI service.
//!
//! Two layouts: the default flat `app/api/routes.py`, and the versioned
//! `app/api/v1/endpoints/` tree selected with the `large-scale` feature.

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

const BASE: &[(&str, &str)] = &[
    ("fastapi", ">=0.109.0"),
    ("uvicorn[standard]", ">=0.25.0"),
    ("pydantic", ">=2.5.0"),
    ("pydantic-settings", ">=2.1.0"),
    ("python-dotenv", ">=1.0.0"),
];

fn relational(c: &ProjectConfig) -> bool {
    matches!(c.orm(), Orm::SqlAlchemy | Orm::SqlModel)
}

static RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "sqlalchemy",
        group: DepGroup::Runtime,
        when: |c| c.orm() == Orm::SqlAlchemy,
        packages: &[("sqlalchemy", ">=2.0.0"), ("alembic", ">=1.13.0")],
    },
    DependencyRule {
        name: "sqlmodel",
        group: DepGroup::Runtime,
        when: |c| c.orm() == Orm::SqlModel,
        packages: &[("sqlmodel", ">=0.0.14")],
    },
    DependencyRule {
        name: "tortoise",
        group: DepGroup::Runtime,
        when: |c| c.orm() == Orm::Tortoise,
        packages: &[("tortoise-orm", ">=0.20.0")],
    },
    DependencyRule {
        name: "postgresql",
        group: DepGroup::Runtime,
        when: |c| c.database() == Database::Postgresql && relational(c),
        packages: &[("asyncpg", ">=0.29.0"), ("psycopg2-binary", ">=2.9.0")],
    },
    DependencyRule {
        name: "mysql",
        group: DepGroup::Runtime,
        when: |c| c.database() == Database::Mysql,
        packages: &[("aiomysql", ">=0.2.0")],
    },
    DependencyRule {
        name: "sqlite",
        group: DepGroup::Runtime,
        when: |c| c.database() == Database::Sqlite,
        packages: &[("aiosqlite", ">=0.19.0")],
    },
    DependencyRule {
        name: "mongodb",
        group: DepGroup::Runtime,
        when: |c| c.database() == Database::Mongodb,
        packages: &[("motor", ">=3.3.0")],
    },
    DependencyRule {
        name: "jwt",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::Jwt),
        packages: &[
            ("python-jose[cryptography]", ">=3.3.0"),
            ("passlib[bcrypt]", ">=1.7.0"),
        ],
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
        packages: &[
            ("pytest", ">=7.4.0"),
            ("pytest-asyncio", ">=0.23.0"),
            ("pytest-cov", ">=4.1.0"),
            ("httpx", ">=0.26.0"),
        ],
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

pub(crate) struct FastApiGenerator;

impl Generator for FastApiGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::FastApi
    }

    fn description(&self) -> &'static str {
        "FastAPI service with pydantic settings"
    }

    fn recognized_features(&self) -> &'static [FeatureTag] {
        &[FeatureTag::LargeScale, FeatureTag::Jwt, FeatureTag::Celery]
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
        let steps = python_next_steps(config, install, &["uvicorn app.main:app --reload"]);
        let t = config.toggles();

        let mut b = PlanBuilder::new(config, renderer);
        b.requirements(manifest)
            .render("app/__init__.py", TemplateId::PythonPackageInit)?
            .render("app/main.py", TemplateId::FastapiMain)?
            .render("app/core/__init__.py", TemplateId::PythonPackageInit)?
            .render("app/core/config.py", TemplateId::FastapiSettings)?
            .render("app/api/__init__.py", TemplateId::PythonPackageInit)?;

        if config.has(FeatureTag::LargeScale) {
            b.render("app/api/v1/__init__.py", TemplateId::PythonPackageInit)?
                .render("app/api/v1/endpoints/__init__.py", TemplateId::PythonPackageInit)?
                .render("app/api/v1/endpoints/health.py", TemplateId::FastapiRouter)?
                .render("app/models/__init__.py", TemplateId::PythonPackageInit)?
                .render("app/schemas/__init__.py", TemplateId::PythonPackageInit)?
                .render("app/services/__init__.py", TemplateId::PythonPackageInit)?;
        } else {
            b.render("app/api/routes.py", TemplateId::FastapiRouter)?;
        }

        if relational(config) {
            b.render("app/db/__init__.py", TemplateId::PythonPackageInit)?
                .render("app/db/session.py", TemplateId::FastapiSession)?
                .render("app/db/base.py", TemplateId::FastapiBase)?;
        }
        if config.orm() == Orm::SqlAlchemy {
            b.render("alembic.ini", TemplateId::AlembicIni)?
                .render("alembic/env.py", TemplateId::AlembicEnv)?
                .dir("alembic/versions");
        }

        b.render_if(
            config.has(FeatureTag::Jwt),
            "app/core/security.py",
            TemplateId::FastapiSecurity,
        )?
        .render_if(
            config.has(FeatureTag::Celery),
            "app/worker.py",
            TemplateId::CeleryWorker,
        )?
        .render_if(t.pytest, "tests/__init__.py", TemplateId::PythonPackageInit)?
        .render_if(t.pytest, "tests/test_main.py", TemplateId::FastapiTest)?
        .render_if(t.pytest || t.mypy, "pyproject.toml", TemplateId::Pyproject)?;

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
        let mut raw = RawProjectConfig::new("fastapi", "api");
        edit(&mut raw);
        FastApiGenerator
            .generate(&raw.normalize().unwrap(), &renderer)
            .unwrap()
    }

    #[test]
    fn default_layout_is_flat() {
        let plan = plan(|_| {});
        assert!(plan.has_file("app/api/routes.py"));
        assert!(!plan.has_directory("app/api/v1"));
        assert!(plan.has_file("requirements-dev.txt"));
        assert_eq!(
            plan.next_steps().last().map(String::as_str),
            Some("uvicorn app.main:app --reload")
        );
    }

    #[test]
    fn large_scale_layout_is_versioned() {
        let plan = plan(|r| r.features = Some("large-scale".into()));
        assert!(plan.has_file("app/api/v1/endpoints/health.py"));
        assert!(plan.has_directory("app/schemas"));
        assert!(!plan.has_file("app/api/routes.py"));
    }

    #[test]
    fn postgres_driver_needs_an_orm() {
        let bare = plan(|r| r.database = Some("postgresql".into()));
        assert!(!bare.manifest().dependencies().contains("asyncpg"));

        let orm = plan(|r| {
            r.database = Some("postgresql".into());
            r.orm = Some("sqlalchemy".into());
        });
        let deps = orm.manifest().dependencies();
        assert!(deps.contains("asyncpg"));
        assert!(deps.contains("alembic"));
        assert!(orm.has_file("alembic/env.py"));
        assert!(orm.has_file("app/db/session.py"));
    }

    #[test]
    fn no_dev_requirements_without_python_tooling() {
        let plan = plan(|r| {
            r.pytest = Some(false);
            r.ruff = Some(false);
            r.mypy = Some(false);
        });
        assert!(!plan.has_file("requirements-dev.txt"));
        assert!(!plan.has_file("pyproject.toml"));
        assert!(plan
            .next_steps()
            .contains(&"pip install -r requirements.txt".to_string()));
    }

    #[test]
    fn jwt_and_celery_add_modules() {
        let plan = plan(|r| r.features = Some("jwt,celery".into()));
        assert!(plan.has_file("app/core/security.py"));
        assert!(plan.has_file("app/worker.py"));
        assert!(plan.manifest().dependencies().contains("redis"));
    }
}
