//! Vue 3 (Vite) and Nuxt 3.

use tracing::instrument;

use super::common::{
    node_common, node_next_steps, tailwind, tailwind_configs, ts, PlanBuilder,
    TAILWIND_PACKAGES,
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

fn pinia(c: &ProjectConfig) -> bool {
    c.has(FeatureTag::Pinia)
}

// ── Vue ──────────────────────────────────────────────────────────────────────

const VUE_BASE: &[(&str, &str)] = &[("vue", "^3.4.0")];
const VUE_BASE_DEV: &[(&str, &str)] = &[("@vitejs/plugin-vue", "^4.5.0"), ("vite", "^5.0.0")];

static VUE_RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "typescript",
        group: DepGroup::Dev,
        when: ts,
        packages: &[("typescript", "^5.3.0"), ("vue-tsc", "^1.8.0")],
    },
    DependencyRule {
        name: "pinia",
        group: DepGroup::Runtime,
        when: pinia,
        packages: &[("pinia", "^2.1.0")],
    },
    DependencyRule {
        name: "vue-router",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::VueRouter),
        packages: &[("vue-router", "^4.2.0")],
    },
    DependencyRule {
        name: "tailwind",
        group: DepGroup::Dev,
        when: tailwind,
        packages: TAILWIND_PACKAGES,
    },
];

fn vue_scripts(config: &ProjectConfig) -> ScriptTable {
    let ts = config.is_typescript();
    let build = if ts { "vue-tsc && vite build" } else { "vite build" };

    ScriptTable::from_candidates([
        ("dev", Script::run("vite")),
        ("build", Script::run(build)),
        ("preview", Script::run("vite preview")),
        ("type-check", Script::when(ts, "vue-tsc --noEmit")),
    ])
}

pub(crate) struct VueGenerator;

impl Generator for VueGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::Vue
    }

    fn description(&self) -> &'static str {
        "Vue 3 app on Vite"
    }

    fn recognized_features(&self) -> &'static [FeatureTag] {
        &[FeatureTag::Pinia, FeatureTag::VueRouter]
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(VUE_BASE, VUE_BASE_DEV, config, VUE_RULES);
        let scripts = vue_scripts(config);
        let steps = node_next_steps(config, &scripts);

        let mut b = PlanBuilder::new(config, renderer);
        let ext = b.ext();

        b.dir("public").dir("src/assets");
        b.package_json(PackageJson::for_project(config).private().esm(), manifest, scripts)?
            .render("index.html", TemplateId::VueIndexHtml)?
            .render(format!("vite.config.{ext}"), TemplateId::VueViteConfig)?
            .render(format!("src/main.{ext}"), TemplateId::VueMain)?
            .render("src/App.vue", TemplateId::VueApp)?
            .render("src/components/HelloWorld.vue", TemplateId::VueHelloWorld)?
            .render("src/style.css", TemplateId::GlobalCss)?;

        if config.is_typescript() {
            b.render("tsconfig.json", TemplateId::TsConfig)?
                .render("src/env.d.ts", TemplateId::VueEnvDts)?;
        }
        b.render_if(
            config.has(FeatureTag::VueRouter),
            format!("src/router/index.{ext}"),
            TemplateId::VueRouter,
        )?
        .render_if(pinia(config), format!("src/stores/counter.{ext}"), TemplateId::PiniaStore)?;

        tailwind_configs(&mut b)?;
        node_common(&mut b)?;

        Ok(b.finish(steps))
    }
}

// ── Nuxt ─────────────────────────────────────────────────────────────────────

const NUXT_BASE_DEV: &[(&str, &str)] = &[("nuxt", "^3.9.0")];

static NUXT_RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "tailwind",
        group: DepGroup::Dev,
        when: tailwind,
        packages: &[("@nuxtjs/tailwindcss", "^6.10.0")],
    },
    DependencyRule {
        name: "pinia",
        group: DepGroup::Runtime,
        when: pinia,
        packages: &[("@pinia/nuxt", "^0.5.0"), ("pinia", "^2.1.0")],
    },
];

pub(crate) struct NuxtGenerator;

impl Generator for NuxtGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::Nuxt
    }

    fn description(&self) -> &'static str {
        "Nuxt 3 full-stack Vue app"
    }

    fn recognized_features(&self) -> &'static [FeatureTag] {
        &[FeatureTag::Pinia]
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(&[], NUXT_BASE_DEV, config, NUXT_RULES);
        let scripts = ScriptTable::from_candidates([
            ("dev", Script::run("nuxt dev")),
            ("build", Script::run("nuxt build")),
            ("generate", Script::run("nuxt generate")),
            ("preview", Script::run("nuxt preview")),
            ("postinstall", Script::run("nuxt prepare")),
        ]);
        let steps = node_next_steps(config, &scripts);

        let mut b = PlanBuilder::new(config, renderer);
        b.dir("public").dir("components").dir("composables");
        b.package_json(PackageJson::for_project(config).private().esm(), manifest, scripts)?
            .render("nuxt.config.ts", TemplateId::NuxtConfig)?
            .render("app.vue", TemplateId::NuxtApp)?
            .render("pages/index.vue", TemplateId::NuxtIndexPage)?
            .render_if(pinia(config), "stores/counter.ts", TemplateId::PiniaStore)?;

        node_common(&mut b)?;
        Ok(b.finish(steps))
    }
}
