use tracing::instrument;

use super::common::{node_next_steps, tailwind, PlanBuilder};
use super::Generator;
use crate::{
    application::ports::TemplateRenderer,
    domain::{
        compose, DepGroup, DependencyRule, GenerationPlan, PackageJson, ProjectConfig,
        ProjectType, Script, ScriptTable, TemplateId,
    },
    error::TrellisResult,
};

static RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "tailwind-cli",
        group: DepGroup::Dev,
        when: tailwind,
        packages: &[("tailwindcss", "^3.4.0")],
    },
    DependencyRule {
        name: "live-server",
        group: DepGroup::Dev,
        when: |c| !c.uses_tailwind(),
        packages: &[("live-server", "^1.2.2")],
    },
];

const TAILWIND_WATCH: &str = "tailwindcss -i ./css/input.css -o ./css/style.css --watch";
const TAILWIND_BUILD: &str = "tailwindcss -i ./css/input.css -o ./css/style.css --minify";

/// Plain HTML/CSS/JS site. Tooling toggles other than Tailwind do not apply.
pub(crate) struct HtmlGenerator;

impl Generator for HtmlGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::Html
    }

    fn description(&self) -> &'static str {
        "Static HTML/CSS/JS site"
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(&[], &[], config, RULES);
        let tw = config.uses_tailwind();
        let scripts = ScriptTable::from_candidates([
            (
                "dev",
                if tw {
                    Script::run(TAILWIND_WATCH)
                } else {
                    Script::run("live-server --port=3000")
                },
            ),
            ("build", Script::when(tw, TAILWIND_BUILD)),
        ]);
        let steps = node_next_steps(config, &scripts);

        let mut b = PlanBuilder::new(config, renderer);
        b.dir("images");
        b.package_json(PackageJson::for_project(config), manifest, scripts)?
            .render("index.html", TemplateId::HtmlIndex)?
            .render("css/style.css", TemplateId::HtmlStyles)?
            .render("js/main.js", TemplateId::HtmlScript)?
            .render("robots.txt", TemplateId::RobotsTxt)?
            .render("README.md", TemplateId::Readme)?
            .render(".gitignore", TemplateId::GitignoreNode)?;

        if tw {
            b.render("css/input.css", TemplateId::GlobalCss)?
                .render("tailwind.config.js", TemplateId::TailwindConfig)?;
        }

        Ok(b.finish(steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockTemplateRenderer;
    use crate::domain::RawProjectConfig;

    fn plan(css: Option<&str>) -> GenerationPlan {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|id, _| Ok(id.to_string()));
        let mut raw = RawProjectConfig::new("html", "landing");
        raw.css_framework = css.map(String::from);
        HtmlGenerator
            .generate(&raw.normalize().unwrap(), &renderer)
            .unwrap()
    }

    #[test]
    fn plain_site_uses_live_server() {
        let plan = plan(None);
        assert_eq!(plan.scripts().get("dev"), Some("live-server --port=3000"));
        assert!(!plan.scripts().contains_key("build"));
        assert!(plan.manifest().dev_dependencies().contains("live-server"));
        assert!(!plan.has_file("tailwind.config.js"));
    }

    #[test]
    fn tailwind_site_builds_css() {
        let plan = plan(Some("tailwind"));
        assert_eq!(plan.scripts().get("build"), Some(TAILWIND_BUILD));
        assert!(!plan.manifest().dev_dependencies().contains("live-server"));
        assert!(plan.has_file("css/input.css"));
    }
}
