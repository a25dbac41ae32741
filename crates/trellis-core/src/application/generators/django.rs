use tracing::instrument;

use super::common::{
    mypy, pytest, python_common, python_next_steps, ruff, PlanBuilder, PythonInstall,
};
use super::Generator;
use crate::{
    application::ports::TemplateRenderer,
    domain::{
        compose, Database, DepGroup, DependencyRule, FeatureTag, GenerationPlan, ProjectConfig,
        ProjectType, TemplateId,
    },
    error::TrellisResult,
};

const BASE: &[(&str, &str)] = &[
    ("django", ">=5.0.0"),
    ("python-dotenv", ">=1.0.0"),
    ("django-environ", ">=0.11.0"),
];

static RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "drf",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::Drf),
        packages: &[("djangorestframework", ">=3.14.0")],
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
        packages: &[("mysqlclient", ">=2.2.0")],
    },
    DependencyRule {
        name: "celery",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::Celery),
        packages: &[
            ("celery", ">=5.3.0"),
            ("redis", ">=5.0.0"),
            ("django-celery-beat", ">=2.5.0"),
        ],
    },
    DependencyRule {
        name: "pytest",
        group: DepGroup::Dev,
        when: pytest,
        packages: &[("pytest", ">=7.4.0"), ("pytest-django", ">=4.7.0")],
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
        packages: &[("mypy", ">=1.8.0"), ("django-stubs", ">=4.2.0")],
    },
];

/// Django project. The settings package is named after the project's
/// module name, so `my-site` becomes `my_site/settings.py`.
pub(crate) struct DjangoGenerator;

impl Generator for DjangoGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::Django
    }

    fn description(&self) -> &'static str {
        "Django project with environment-driven settings"
    }

    fn recognized_features(&self) -> &'static [FeatureTag] {
        &[FeatureTag::Drf, FeatureTag::Celery]
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
        let steps = python_next_steps(
            config,
            install,
            &["python manage.py migrate", "python manage.py runserver"],
        );
        let module = config.module_name();
        let t = config.toggles();

        let mut b = PlanBuilder::new(config, renderer);
        b.dir("apps").dir("templates").dir("static");
        b.requirements(manifest)
            .render_executable("manage.py", TemplateId::DjangoManage)?
            .render(format!("{module}/__init__.py"), TemplateId::PythonPackageInit)?
            .render(format!("{module}/settings.py"), TemplateId::DjangoSettings)?
            .render(format!("{module}/urls.py"), TemplateId::DjangoUrls)?
            .render(format!("{module}/wsgi.py"), TemplateId::DjangoWsgi)?
            .render(format!("{module}/asgi.py"), TemplateId::DjangoAsgi)?
            .render_if(
                config.has(FeatureTag::Celery),
                format!("{module}/celery.py"),
                TemplateId::DjangoCelery,
            )?;

        if t.pytest {
            b.render("pytest.ini", TemplateId::DjangoPytestIni)?
                .text("tests/__init__.py", String::new())
                .render("tests/test_views.py", TemplateId::DjangoTest)?;
        }
        b.render_if(t.mypy, "pyproject.toml", TemplateId::Pyproject)?;

        python_common(&mut b)?;
        Ok(b.finish(steps))
    }
}
