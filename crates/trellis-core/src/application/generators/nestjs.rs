use tracing::instrument;

use super::common::{
    eslint, lint_configs, node_common, node_next_steps, prettier, testing, PlanBuilder,
    TS_ESLINT_PACKAGES,
};
use super::Generator;
use crate::{
    application::ports::TemplateRenderer,
    domain::{
        compose, DepGroup, DependencyRule, FeatureTag, GenerationPlan, PackageJson,
        ProjectConfig, ProjectType, Script, ScriptTable, TemplateId,
    },
    error::TrellisResult,
};

const BASE: &[(&str, &str)] = &[
    ("@nestjs/common", "^10.0.0"),
    ("@nestjs/core", "^10.0.0"),
    ("@nestjs/platform-express", "^10.0.0"),
    ("reflect-metadata", "^0.1.13"),
    ("rxjs", "^7.8.0"),
];

const BASE_DEV: &[(&str, &str)] = &[
    ("@nestjs/cli", "^10.0.0"),
    ("@nestjs/schematics", "^10.0.0"),
    ("@types/node", "^22.0.0"),
    ("@types/express", "^4.17.0"),
    ("typescript", "^5.3.0"),
    ("ts-node", "^10.9.0"),
];

static RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "testing",
        group: DepGroup::Dev,
        when: testing,
        packages: &[
            ("@nestjs/testing", "^10.0.0"),
            ("jest", "^29.7.0"),
            ("@types/jest", "^29.5.0"),
            ("ts-jest", "^29.1.0"),
        ],
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
        when: eslint,
        packages: TS_ESLINT_PACKAGES,
    },
    DependencyRule {
        name: "prettier",
        group: DepGroup::Dev,
        when: prettier,
        packages: &[("prettier", "^3.1.0")],
    },
    DependencyRule {
        name: "swagger",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::Swagger),
        packages: &[("@nestjs/swagger", "^7.1.0")],
    },
    DependencyRule {
        name: "zod",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::Zod),
        packages: &[("zod", "^3.22.0")],
    },
];

/// NestJS is TypeScript-only.
pub(crate) struct NestJsGenerator;

impl Generator for NestJsGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::NestJs
    }

    fn description(&self) -> &'static str {
        "NestJS API (TypeScript)"
    }

    fn recognized_features(&self) -> &'static [FeatureTag] {
        &[FeatureTag::Swagger, FeatureTag::Zod]
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(BASE, BASE_DEV, config, RULES);
        let t = config.toggles();
        let scripts = ScriptTable::from_candidates([
            ("build", Script::run("nest build")),
            ("start", Script::run("nest start")),
            ("start:dev", Script::run("nest start --watch")),
            ("start:debug", Script::run("nest start --debug --watch")),
            ("start:prod", Script::run("node dist/main")),
            ("lint", Script::when(t.eslint, "eslint \"src/**/*.ts\"")),
            ("format", Script::when(t.prettier, "prettier --write \"src/**/*.ts\"")),
            ("test", Script::when(t.testing, "jest")),
            ("test:watch", Script::when(t.testing, "jest --watch")),
        ]);
        let steps = node_next_steps(config, &scripts);

        let mut b = PlanBuilder::new(config, renderer);
        b.package_json(PackageJson::for_project(config).private(), manifest, scripts)?
            .render("nest-cli.json", TemplateId::NestCliJson)?
            .render("tsconfig.json", TemplateId::TsConfig)?
            .render("tsconfig.build.json", TemplateId::TsConfigBuild)?
            .render("src/main.ts", TemplateId::NestMain)?
            .render("src/app.module.ts", TemplateId::NestAppModule)?
            .render("src/app.controller.ts", TemplateId::NestAppController)?
            .render("src/app.service.ts", TemplateId::NestAppService)?
            .render_if(
                t.testing,
                "src/app.controller.spec.ts",
                TemplateId::NestControllerSpec,
            )?;

        lint_configs(&mut b)?;
        node_common(&mut b)?;
        Ok(b.finish(steps))
    }
}
