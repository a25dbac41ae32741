use tracing::instrument;

use super::common::{node_common, node_next_steps, tailwind, tailwind_configs, PlanBuilder};
use super::Generator;
use crate::{
    application::ports::TemplateRenderer,
    domain::{
        compose, DepGroup, DependencyRule, GenerationPlan, PackageJson, ProjectConfig,
        ProjectType, Script, ScriptTable, TemplateId,
    },
    error::TrellisResult,
};

const BASE: &[(&str, &str)] = &[
    ("@angular/common", "^17.0.0"),
    ("@angular/compiler", "^17.0.0"),
    ("@angular/core", "^17.0.0"),
    ("@angular/platform-browser", "^17.0.0"),
    ("@angular/platform-browser-dynamic", "^17.0.0"),
    ("@angular/router", "^17.0.0"),
    ("rxjs", "^7.8.0"),
    ("tslib", "^2.6.0"),
    ("zone.js", "^0.14.0"),
];

const BASE_DEV: &[(&str, &str)] = &[
    ("@angular-devkit/build-angular", "^17.0.0"),
    ("@angular/cli", "^17.0.0"),
    ("@angular/compiler-cli", "^17.0.0"),
    ("typescript", "^5.2.0"),
];

static RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "tailwind",
        group: DepGroup::Dev,
        when: tailwind,
        packages: super::common::TAILWIND_PACKAGES,
    },
    DependencyRule {
        name: "testing",
        group: DepGroup::Dev,
        when: super::common::testing,
        packages: &[
            ("jasmine-core", "^5.1.0"),
            ("karma", "^6.4.0"),
            ("karma-chrome-launcher", "^3.2.0"),
            ("karma-jasmine", "^5.1.0"),
            ("@types/jasmine", "^5.1.0"),
        ],
    },
];

/// Angular is TypeScript-only; the language setting is not consulted.
pub(crate) struct AngularGenerator;

impl Generator for AngularGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::Angular
    }

    fn description(&self) -> &'static str {
        "Angular 17 standalone-component app"
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(BASE, BASE_DEV, config, RULES);
        let scripts = ScriptTable::from_candidates([
            ("ng", Script::run("ng")),
            ("start", Script::run("ng serve")),
            ("build", Script::run("ng build")),
            ("test", Script::when(config.toggles().testing, "ng test")),
        ]);
        let steps = node_next_steps(config, &scripts);

        let mut b = PlanBuilder::new(config, renderer);
        b.dir("src/assets");
        b.package_json(PackageJson::for_project(config).private(), manifest, scripts)?
            .render("angular.json", TemplateId::AngularJson)?
            .render("tsconfig.json", TemplateId::TsConfig)?
            .render("tsconfig.app.json", TemplateId::TsConfigApp)?
            .render("src/index.html", TemplateId::AngularIndexHtml)?
            .render("src/main.ts", TemplateId::AngularMain)?
            .render("src/styles.css", TemplateId::GlobalCss)?
            .render("src/app/app.component.ts", TemplateId::AngularAppComponent)?
            .render("src/app/app.config.ts", TemplateId::AngularAppConfig)?
            .render("src/app/app.routes.ts", TemplateId::AngularRoutes)?;

        tailwind_configs(&mut b)?;
        node_common(&mut b)?;
        Ok(b.finish(steps))
    }
}
