use tracing::instrument;

use super::common::{
    node_common, node_next_steps, tailwind, tailwind_configs, ts, PlanBuilder,
    TAILWIND_PACKAGES,
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

const BASE_DEV: &[(&str, &str)] = &[
    ("@sveltejs/adapter-auto", "^3.0.0"),
    ("@sveltejs/kit", "^2.0.0"),
    ("svelte", "^4.2.0"),
    ("vite", "^5.0.0"),
];

static RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "typescript",
        group: DepGroup::Dev,
        when: ts,
        packages: &[
            ("typescript", "^5.3.0"),
            ("svelte-check", "^3.6.0"),
            ("tslib", "^2.6.0"),
        ],
    },
    DependencyRule {
        name: "tailwind",
        group: DepGroup::Dev,
        when: tailwind,
        packages: TAILWIND_PACKAGES,
    },
];

pub(crate) struct SvelteGenerator;

impl Generator for SvelteGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::Svelte
    }

    fn description(&self) -> &'static str {
        "SvelteKit app"
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(&[], BASE_DEV, config, RULES);
        let check = "svelte-kit sync && svelte-check --tsconfig ./tsconfig.json";
        let scripts = ScriptTable::from_candidates([
            ("dev", Script::run("vite dev")),
            ("build", Script::run("vite build")),
            ("preview", Script::run("vite preview")),
            ("check", Script::when(config.is_typescript(), check)),
        ]);
        let steps = node_next_steps(config, &scripts);

        let mut b = PlanBuilder::new(config, renderer);
        let ext = b.ext();

        b.dir("static").dir("src/lib");
        b.package_json(PackageJson::for_project(config).private().esm(), manifest, scripts)?
            .render("svelte.config.js", TemplateId::SvelteConfig)?
            .render(format!("vite.config.{ext}"), TemplateId::SvelteViteConfig)?
            .render("src/app.html", TemplateId::SvelteAppHtml)?
            .render("src/app.css", TemplateId::GlobalCss)?
            .render("src/routes/+layout.svelte", TemplateId::SvelteLayout)?
            .render("src/routes/+page.svelte", TemplateId::SveltePage)?;

        if config.is_typescript() {
            b.render("tsconfig.json", TemplateId::TsConfig)?
                .render("src/app.d.ts", TemplateId::SvelteAppDts)?;
        }

        tailwind_configs(&mut b)?;
        node_common(&mut b)?;
        Ok(b.finish(steps))
    }
}
