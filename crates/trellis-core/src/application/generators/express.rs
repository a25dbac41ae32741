//! Express REST API.
//!
//! Rule order matters on two keys: `mongoose` is set by both the `mongodb`
//! and `mongoose` rules, and `nodemon` by both `typescript` and
//! `javascript`. Only one of each pair can fire for a given config, so the
//! tables stay unambiguous.

use tracing::instrument;

use super::common::{
    eslint, eslint_ts, js, lint_configs, node_common, node_next_steps, prettier, testing, ts,
    PlanBuilder, TS_ESLINT_PACKAGES,
};
use super::Generator;
use crate::{
    application::ports::TemplateRenderer,
    domain::{
        compose, Database, DepGroup, DependencyRule, FeatureTag, GenerationPlan, Orm,
        PackageJson, ProjectConfig, ProjectType, Script, ScriptTable, TemplateId,
    },
    error::TrellisResult,
};

const BASE: &[(&str, &str)] = &[
    ("express", "^4.18.0"),
    ("cors", "^2.8.0"),
    ("helmet", "^7.1.0"),
    ("morgan", "^1.10.0"),
    ("dotenv", "^16.3.0"),
];

static RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "typescript",
        group: DepGroup::Dev,
        when: ts,
        packages: &[
            ("typescript", "^5.3.0"),
            ("@types/node", "^22.0.0"),
            ("@types/express", "^4.17.0"),
            ("@types/cors", "^2.8.0"),
            ("@types/morgan", "^1.9.0"),
            ("ts-node", "^10.9.0"),
            ("tsx", "^4.6.0"),
            ("nodemon", "^3.0.0"),
        ],
    },
    DependencyRule {
        name: "javascript",
        group: DepGroup::Dev,
        when: js,
        packages: &[("nodemon", "^3.0.0")],
    },
    DependencyRule {
        name: "eslint",
        group: DepGroup::Dev,
        when: eslint,
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
        when: prettier,
        packages: &[("prettier", "^3.1.0")],
    },
    DependencyRule {
        name: "prisma-client",
        group: DepGroup::Runtime,
        when: |c| c.orm() == Orm::Prisma,
        packages: &[("@prisma/client", "^5.7.0")],
    },
    DependencyRule {
        name: "prisma-cli",
        group: DepGroup::Dev,
        when: |c| c.orm() == Orm::Prisma,
        packages: &[("prisma", "^5.7.0")],
    },
    DependencyRule {
        name: "typeorm",
        group: DepGroup::Runtime,
        when: |c| c.orm() == Orm::TypeOrm,
        packages: &[("typeorm", "^0.3.0"), ("reflect-metadata", "^0.1.0")],
    },
    DependencyRule {
        name: "sequelize",
        group: DepGroup::Runtime,
        when: |c| c.orm() == Orm::Sequelize,
        packages: &[("sequelize", "^6.35.0")],
    },
    DependencyRule {
        name: "drizzle",
        group: DepGroup::Runtime,
        when: |c| c.orm() == Orm::Drizzle,
        packages: &[("drizzle-orm", "^0.29.0")],
    },
    DependencyRule {
        name: "drizzle-kit",
        group: DepGroup::Dev,
        when: |c| c.orm() == Orm::Drizzle,
        packages: &[("drizzle-kit", "^0.20.0")],
    },
    DependencyRule {
        name: "postgresql",
        group: DepGroup::Runtime,
        when: |c| c.database() == Database::Postgresql,
        packages: &[("pg", "^8.11.0")],
    },
    DependencyRule {
        name: "mysql",
        group: DepGroup::Runtime,
        when: |c| c.database() == Database::Mysql,
        packages: &[("mysql2", "^3.6.0")],
    },
    DependencyRule {
        name: "sqlite",
        group: DepGroup::Runtime,
        when: |c| c.database() == Database::Sqlite,
        packages: &[("better-sqlite3", "^9.2.0")],
    },
    DependencyRule {
        name: "mongodb",
        group: DepGroup::Runtime,
        when: |c| c.database() == Database::Mongodb,
        packages: &[("mongoose", "^8.0.0")],
    },
    DependencyRule {
        name: "mongoose",
        group: DepGroup::Runtime,
        when: |c| c.orm() == Orm::Mongoose && c.database() != Database::Mongodb,
        packages: &[("mongoose", "^8.0.0")],
    },
    DependencyRule {
        name: "zod",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::Zod),
        packages: &[("zod", "^3.22.0")],
    },
    DependencyRule {
        name: "swagger",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::Swagger),
        packages: &[("swagger-ui-express", "^5.0.0"), ("swagger-jsdoc", "^6.2.0")],
    },
    DependencyRule {
        name: "testing",
        group: DepGroup::Dev,
        when: testing,
        packages: &[
            ("vitest", "^1.0.0"),
            ("supertest", "^6.3.0"),
            ("@types/supertest", "^2.0.0"),
        ],
    },
];

fn scripts(config: &ProjectConfig) -> ScriptTable {
    let t = config.toggles();
    let ts = config.is_typescript();
    let prisma = config.orm() == Orm::Prisma;

    ScriptTable::from_candidates([
        (
            "dev",
            if ts {
                Script::run("tsx watch src/index.ts")
            } else {
                Script::run("nodemon src/index.js")
            },
        ),
        ("build", Script::when(ts, "tsc")),
        (
            "start",
            Script::run(if ts {
                "node dist/index.js"
            } else {
                "node src/index.js"
            }),
        ),
        ("lint", Script::when(t.eslint, "eslint src")),
        ("format", Script::when(t.prettier, "prettier --write src")),
        ("test", Script::when(t.testing, "vitest")),
        ("db:generate", Script::when(prisma, "prisma generate")),
        ("db:migrate", Script::when(prisma, "prisma migrate dev")),
    ])
}

/// A database client module is generated when there is something to wire.
fn has_database_module(config: &ProjectConfig) -> bool {
    config.orm() != Orm::None || config.database() != Database::None
}

pub(crate) struct ExpressGenerator;

impl Generator for ExpressGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::Express
    }

    fn description(&self) -> &'static str {
        "Express REST API"
    }

    fn recognized_features(&self) -> &'static [FeatureTag] {
        &[FeatureTag::Zod, FeatureTag::Swagger]
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(BASE, &[], config, RULES);
        let scripts = scripts(config);
        let steps = node_next_steps(config, &scripts);

        let mut b = PlanBuilder::new(config, renderer);
        let ext = b.ext();

        b.dir("src/controllers").dir("src/models").dir("src/services");
        b.package_json(PackageJson::for_project(config).private(), manifest, scripts)?
            .render(format!("src/index.{ext}"), TemplateId::ExpressIndex)?
            .render(format!("src/routes/index.{ext}"), TemplateId::ExpressRoutes)?
            .render(
                format!("src/middleware/errorHandler.{ext}"),
                TemplateId::ExpressErrorHandler,
            )?
            .render_if(config.is_typescript(), "tsconfig.json", TemplateId::TsConfig)?
            .render_if(
                has_database_module(config),
                format!("src/db/index.{ext}"),
                TemplateId::ExpressDatabase,
            )?
            .render_if(
                config.orm() == Orm::Prisma,
                "prisma/schema.prisma",
                TemplateId::PrismaSchema,
            )?
            .render_if(
                config.has(FeatureTag::Swagger),
                format!("src/docs/swagger.{ext}"),
                TemplateId::ExpressSwagger,
            )?
            .render_if(
                config.toggles().testing,
                format!("tests/app.test.{ext}"),
                TemplateId::ExpressAppTest,
            )?;

        lint_configs(&mut b)?;
        node_common(&mut b)?;
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
        let mut raw = RawProjectConfig::new("express", "api");
        edit(&mut raw);
        ExpressGenerator
            .generate(&raw.normalize().unwrap(), &renderer)
            .unwrap()
    }

    #[test]
    fn javascript_api_runs_with_nodemon() {
        let plan = plan(|r| r.language = Some("javascript".into()));

        assert_eq!(plan.scripts().get("dev"), Some("nodemon src/index.js"));
        assert_eq!(plan.scripts().get("start"), Some("node src/index.js"));
        assert!(!plan.scripts().contains_key("build"));
        assert!(!plan.manifest().dev_dependencies().contains("typescript"));
        assert!(plan.manifest().dev_dependencies().contains("nodemon"));
    }

    #[test]
    fn typescript_api_builds_with_tsc() {
        let plan = plan(|r| r.language = Some("typescript".into()));
        assert_eq!(plan.scripts().get("build"), Some("tsc"));
        assert!(plan.has_file("tsconfig.json"));
        assert!(plan.has_file("src/index.ts"));
    }

    #[test]
    fn mongodb_with_mongoose_orm_adds_one_entry() {
        let plan = plan(|r| {
            r.database = Some("mongodb".into());
            r.orm = Some("mongoose".into());
        });
        let runtime = plan.manifest().dependencies();
        assert_eq!(runtime.names().filter(|n| *n == "mongoose").count(), 1);
        assert!(plan.manifest().applied_rules().contains(&"mongodb"));
        assert!(!plan.manifest().applied_rules().contains(&"mongoose"));
        assert!(plan.has_file("src/db/index.ts"));
    }

    #[test]
    fn swagger_and_zod_features() {
        let plan = plan(|r| r.features = Some("swagger, zod".into()));
        let runtime = plan.manifest().dependencies();
        assert!(runtime.contains("zod"));
        assert!(runtime.contains("swagger-ui-express"));
        assert!(plan.has_file("src/docs/swagger.ts"));
    }

    #[test]
    fn no_database_module_without_storage() {
        let plan = plan(|_| {});
        assert!(!plan.has_directory("src/db"));
    }
}
