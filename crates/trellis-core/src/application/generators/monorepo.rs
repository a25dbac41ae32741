use tracing::instrument;

use super::common::{lint_configs, node_common, node_next_steps, prettier, PlanBuilder};
use super::Generator;
use crate::{
    application::ports::TemplateRenderer,
    domain::{
        compose, DepGroup, DependencyRule, GenerationPlan, PackageJson, PackageManager,
        ProjectConfig, ProjectType, Script, ScriptTable, TemplateId,
    },
    error::TrellisResult,
};

const BASE_DEV: &[(&str, &str)] = &[("turbo", "^1.11.0")];

static RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "typescript",
        group: DepGroup::Dev,
        when: super::common::ts,
        packages: &[("typescript", "^5.3.0")],
    },
    DependencyRule {
        name: "prettier",
        group: DepGroup::Dev,
        when: prettier,
        packages: &[("prettier", "^3.1.0")],
    },
];

/// Turborepo workspace with empty `apps/` and `packages/`.
pub(crate) struct MonorepoGenerator;

impl Generator for MonorepoGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::Monorepo
    }

    fn description(&self) -> &'static str {
        "Turborepo workspace (apps/ and packages/)"
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(&[], BASE_DEV, config, RULES);
        let t = config.toggles();
        let scripts = ScriptTable::from_candidates([
            ("build", Script::run("turbo run build")),
            ("dev", Script::run("turbo run dev")),
            ("lint", Script::when(t.eslint, "turbo run lint")),
            ("test", Script::when(t.testing, "turbo run test")),
            (
                "format",
                Script::when(t.prettier, "prettier --write \"**/*.{ts,tsx,md}\""),
            ),
        ]);
        let steps = node_next_steps(config, &scripts);

        let mut package = PackageJson::for_project(config).private();
        package.workspaces = Some(vec!["apps/*".into(), "packages/*".into()]);

        let mut b = PlanBuilder::new(config, renderer);
        b.package_json(package, manifest, scripts)?
            .render("turbo.json", TemplateId::TurboJson)?
            .render("apps/.gitkeep", TemplateId::Gitkeep)?
            .render("packages/.gitkeep", TemplateId::Gitkeep)?
            .render_if(
                config.package_manager() == PackageManager::Pnpm,
                "pnpm-workspace.yaml",
                TemplateId::PnpmWorkspace,
            )?;

        lint_configs(&mut b)?;
        node_common(&mut b)?;
        Ok(b.finish(steps))
    }
}
