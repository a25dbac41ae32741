use serde_json::json;
use tracing::instrument;

use super::common::{
    eslint, lint_configs, node_common, node_next_steps, testing, PlanBuilder,
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

const BASE_DEV: &[(&str, &str)] = &[("typescript", "^5.3.0"), ("tsup", "^8.0.0")];

static RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "testing",
        group: DepGroup::Dev,
        when: testing,
        packages: &[("vitest", "^1.0.0")],
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
];

/// Publishable TypeScript package bundled with tsup into ESM and CJS.
pub(crate) struct TypeScriptLibGenerator;

impl Generator for TypeScriptLibGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::TypeScript
    }

    fn description(&self) -> &'static str {
        "TypeScript library bundled with tsup"
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
            ("build", Script::run("tsup")),
            ("dev", Script::run("tsup --watch")),
            ("test", Script::when(t.testing, "vitest")),
            ("lint", Script::when(t.eslint, "eslint src")),
            ("prepublishOnly", Script::run("npm run build")),
        ]);
        let steps = node_next_steps(config, &scripts);

        let mut package = PackageJson::for_project(config);
        package.main = Some("./dist/index.js".into());
        package.module = Some("./dist/index.mjs".into());
        package.types = Some("./dist/index.d.ts".into());
        package.exports = Some(json!({
            ".": {
                "types": "./dist/index.d.ts",
                "import": "./dist/index.mjs",
                "require": "./dist/index.js"
            }
        }));
        package.files = Some(vec!["dist".into()]);

        let mut b = PlanBuilder::new(config, renderer);
        b.package_json(package, manifest, scripts)?
            .render("tsconfig.json", TemplateId::TsConfig)?
            .render("tsup.config.ts", TemplateId::TsupConfig)?
            .render("src/index.ts", TemplateId::TsLibIndex)?
            .render_if(t.testing, "src/index.test.ts", TemplateId::TsLibTest)?;

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

    #[test]
    fn package_json_exposes_dual_entry_points() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|id, _| Ok(id.to_string()));
        let config = RawProjectConfig::new("typescript", "tiny-lib")
            .normalize()
            .unwrap();
        let plan = TypeScriptLibGenerator.generate(&config, &renderer).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&plan.file("package.json").unwrap().content).unwrap();
        assert_eq!(json["main"], "./dist/index.js");
        assert_eq!(json["exports"]["."]["import"], "./dist/index.mjs");
        assert_eq!(json["files"][0], "dist");
        assert_eq!(json["scripts"]["prepublishOnly"], "npm run build");
        assert!(json["devDependencies"]["tsup"].is_string());
    }
}
