use tracing::instrument;

use super::common::{
    eslint, eslint_ts, lint_configs, node_common, node_next_steps, prettier, ts, PlanBuilder,
    TS_ESLINT_PACKAGES,
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

const BASE_DEV: &[(&str, &str)] = &[("electron", "^28.0.0"), ("electron-builder", "^24.9.0")];

static RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "typescript",
        group: DepGroup::Dev,
        when: ts,
        packages: &[("typescript", "^5.3.0"), ("@types/node", "^22.0.0")],
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
];

/// Electron desktop shell: main process, preload bridge and a static
/// renderer page.
pub(crate) struct ElectronGenerator;

impl Generator for ElectronGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::Electron
    }

    fn description(&self) -> &'static str {
        "Electron desktop app"
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(&[], BASE_DEV, config, RULES);
        let ts = config.is_typescript();
        let t = config.toggles();
        let scripts = ScriptTable::from_candidates([
            ("build:ts", Script::when(ts, "tsc")),
            (
                "start",
                Script::run(if ts { "tsc && electron ." } else { "electron ." }),
            ),
            ("build", Script::run("electron-builder")),
            ("lint", Script::when(t.eslint, "eslint src")),
            ("format", Script::when(t.prettier, "prettier --write src")),
        ]);
        let steps = node_next_steps(config, &scripts);

        let mut package = PackageJson::for_project(config);
        package.main = Some(if ts { "dist/main.js" } else { "src/main.js" }.into());

        let mut b = PlanBuilder::new(config, renderer);
        let ext = b.ext();
        b.package_json(package, manifest, scripts)?
            .render(format!("src/main.{ext}"), TemplateId::ElectronMain)?
            .render(format!("src/preload.{ext}"), TemplateId::ElectronPreload)?
            .render("src/index.html", TemplateId::ElectronIndexHtml)?
            .render("src/renderer.js", TemplateId::ElectronRenderer)?
            .render_if(ts, "tsconfig.json", TemplateId::TsConfig)?;

        lint_configs(&mut b)?;
        node_common(&mut b)?;
        Ok(b.finish(steps))
    }
}
