//! Built-in template renderer.
//!
//! Every [`TemplateId`] maps to either template text or a JSON document.
//! Template text (static, or computed from the config like CI and Docker
//! files) goes through one [`RenderContext`] substitution pass, so
//! user-supplied values are inserted through `{{PLACEHOLDERS}}` and never
//! parsed as template text. JSON documents carry real values and are
//! returned as serialized, so `serde_json` does all the escaping.

use std::borrow::Cow;

use serde_json::Value;
use tracing::trace;
use trellis_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{ProjectConfig, RenderContext, TemplateId},
    error::TrellisResult,
};

mod backend;
mod frontend;
mod library;
mod tooling;

type Text = Cow<'static, str>;

/// Renders the templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRenderer;

impl BuiltinRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for BuiltinRenderer {
    fn render(&self, id: TemplateId, config: &ProjectConfig) -> TrellisResult<String> {
        trace!(template = %id, "rendering");
        match source(id, config)? {
            Source::Template(text) => Ok(RenderContext::from_config(config).render(id, &text)?),
            Source::Document(text) => Ok(text),
        }
    }
}

enum Source {
    /// Text with `{{PLACEHOLDERS}}` still to substitute.
    Template(Text),
    /// Finished output of a serializer.
    Document(String),
}

/// Pretty JSON with a trailing newline, keys in insertion order.
fn json(id: TemplateId, value: &Value) -> TrellisResult<Source> {
    let mut text =
        serde_json::to_string_pretty(value).map_err(|e| ApplicationError::RenderingFailed {
            template: id.as_str(),
            reason: e.to_string(),
        })?;
    text.push('\n');
    Ok(Source::Document(text))
}

fn source(id: TemplateId, c: &ProjectConfig) -> TrellisResult<Source> {
    use TemplateId as T;

    let text: Text = match id {
        // Shared tooling
        T::GitignoreNode => tooling::GITIGNORE_NODE.into(),
        T::GitignorePython => tooling::GITIGNORE_PYTHON.into(),
        T::EnvExampleNode => tooling::env_example_node(c).into(),
        T::EnvExamplePython => tooling::env_example_python(c).into(),
        T::Readme => tooling::readme(c).into(),
        T::VscodeSettings => return json(id, &tooling::vscode_settings(c)),
        T::CiWorkflow => tooling::ci_workflow(c).into(),
        T::Dockerfile => tooling::dockerfile(c).into(),
        T::Dockerignore => tooling::dockerignore(c).into(),
        T::DockerCompose => tooling::docker_compose(c).into(),
        T::PrettierConfig => return json(id, &tooling::prettier_config(c)),
        T::EslintConfig => return json(id, &tooling::eslint_config(c)),
        T::TsConfig => return json(id, &tooling::tsconfig(c)),
        T::TailwindConfig => tooling::tailwind_config(c).into(),
        T::PostcssConfig => tooling::postcss_config(c).into(),
        T::GlobalCss => tooling::global_css(c).into(),
        T::VitestConfig => frontend::REACT_VITEST_CONFIG.into(),
        T::VitestSetup => tooling::VITEST_SETUP.into(),
        T::TsupConfig => tooling::TSUP_CONFIG.into(),
        T::RuffConfig => tooling::ruff_config(c).into(),
        T::Pyproject => tooling::pyproject_tools(c).into(),
        T::PythonPackageInit => tooling::python_package_init(c).into(),
        T::Gitkeep => "".into(),

        // Static site
        T::HtmlIndex => frontend::html_index(c).into(),
        T::HtmlStyles => frontend::HTML_STYLES.into(),
        T::HtmlScript => frontend::HTML_SCRIPT.into(),
        T::RobotsTxt => frontend::ROBOTS_TXT.into(),

        // React
        T::ReactViteConfig => frontend::REACT_VITE_CONFIG.into(),
        T::ReactIndexHtml => frontend::react_index_html(c).into(),
        T::ReactMain => frontend::react_main(c).into(),
        T::ReactApp => frontend::react_app(c).into(),
        T::ReactAppTest => frontend::REACT_APP_TEST.into(),
        T::ViteEnvDts => frontend::VITE_ENV_DTS.into(),
        T::ZustandStore => frontend::zustand_store(c).into(),
        T::ReduxStore => frontend::redux_store(c).into(),
        T::QueryClient => frontend::QUERY_CLIENT.into(),

        // Next.js
        T::NextConfig => frontend::NEXT_CONFIG.into(),
        T::NextLayout => frontend::next_layout(c).into(),
        T::NextPage => frontend::next_page(c).into(),
        T::NextEnvDts => frontend::NEXT_ENV_DTS.into(),
        T::NextUtils => frontend::next_utils(c).into(),
        T::NextAuthRoute => frontend::NEXT_AUTH_ROUTE.into(),
        T::PrismaSchema => backend::prisma_schema(c).into(),
        T::PrismaClient => backend::prisma_client(c).into(),

        // Vue / Nuxt
        T::VueViteConfig => frontend::VUE_VITE_CONFIG.into(),
        T::VueIndexHtml => frontend::vue_index_html(c).into(),
        T::VueMain => frontend::vue_main(c).into(),
        T::VueApp => frontend::vue_app(c).into(),
        T::VueHelloWorld => frontend::vue_hello_world(c).into(),
        T::VueRouter => frontend::VUE_ROUTER.into(),
        T::PiniaStore => frontend::PINIA_STORE.into(),
        T::VueEnvDts => frontend::VUE_ENV_DTS.into(),
        T::NuxtConfig => frontend::nuxt_config(c).into(),
        T::NuxtApp => frontend::NUXT_APP.into(),
        T::NuxtIndexPage => frontend::NUXT_INDEX_PAGE.into(),

        // SvelteKit
        T::SvelteConfig => frontend::SVELTE_CONFIG.into(),
        T::SvelteViteConfig => frontend::SVELTE_VITE_CONFIG.into(),
        T::SvelteAppHtml => frontend::SVELTE_APP_HTML.into(),
        T::SvelteAppDts => frontend::SVELTE_APP_DTS.into(),
        T::SvelteLayout => frontend::svelte_layout(c).into(),
        T::SveltePage => frontend::svelte_page(c).into(),

        // Angular
        T::AngularJson => return json(id, &frontend::angular_json(c)),
        T::TsConfigApp => return json(id, &frontend::tsconfig_app()),
        T::AngularIndexHtml => frontend::ANGULAR_INDEX_HTML.into(),
        T::AngularMain => frontend::ANGULAR_MAIN.into(),
        T::AngularAppComponent => frontend::ANGULAR_APP_COMPONENT.into(),
        T::AngularAppConfig => frontend::ANGULAR_APP_CONFIG.into(),
        T::AngularRoutes => frontend::ANGULAR_ROUTES.into(),

        // Express / NestJS
        T::ExpressIndex => backend::express_index(c).into(),
        T::ExpressRoutes => backend::express_routes(c).into(),
        T::ExpressErrorHandler => backend::express_error_handler(c).into(),
        T::ExpressDatabase => backend::express_database(c).into(),
        T::ExpressSwagger => backend::express_swagger(c).into(),
        T::ExpressAppTest => backend::express_app_test(c).into(),
        T::NestCliJson => return json(id, &backend::nest_cli_json()),
        T::TsConfigBuild => return json(id, &backend::tsconfig_build()),
        T::NestMain => backend::nest_main(c).into(),
        T::NestAppModule => backend::NEST_APP_MODULE.into(),
        T::NestAppController => backend::NEST_APP_CONTROLLER.into(),
        T::NestAppService => backend::NEST_APP_SERVICE.into(),
        T::NestControllerSpec => backend::NEST_CONTROLLER_SPEC.into(),

        // FastAPI
        T::FastapiMain => backend::fastapi_main(c).into(),
        T::FastapiSettings => backend::fastapi_settings(c).into(),
        T::FastapiRouter => backend::FASTAPI_ROUTER.into(),
        T::FastapiSession => backend::FASTAPI_SESSION.into(),
        T::FastapiBase => backend::fastapi_base(c).into(),
        T::FastapiSecurity => backend::FASTAPI_SECURITY.into(),
        T::CeleryWorker => backend::CELERY_WORKER.into(),
        T::AlembicIni => backend::ALEMBIC_INI.into(),
        T::AlembicEnv => backend::ALEMBIC_ENV.into(),
        T::FastapiTest => backend::fastapi_test(c).into(),

        // Django
        T::DjangoManage => backend::DJANGO_MANAGE.into(),
        T::DjangoSettings => backend::django_settings(c).into(),
        T::DjangoUrls => backend::django_urls(c).into(),
        T::DjangoWsgi => backend::DJANGO_WSGI.into(),
        T::DjangoAsgi => backend::DJANGO_ASGI.into(),
        T::DjangoCelery => backend::DJANGO_CELERY.into(),
        T::DjangoPytestIni => backend::DJANGO_PYTEST_INI.into(),
        T::DjangoTest => backend::DJANGO_TEST.into(),

        // Flask
        T::FlaskFactory => backend::flask_factory(c).into(),
        T::FlaskRoutes => backend::FLASK_ROUTES.into(),
        T::FlaskConfig => backend::flask_config(c).into(),
        T::FlaskWsgi => backend::FLASK_WSGI.into(),
        T::FlaskTest => backend::FLASK_TEST.into(),

        // Libraries and CLIs
        T::PythonLibCore => library::PYTHON_LIB_CORE.into(),
        T::PythonLibTest => library::PYTHON_LIB_TEST.into(),
        T::PythonCliMain => library::PYTHON_CLI_MAIN.into(),
        T::PythonCliTest => library::PYTHON_CLI_TEST.into(),
        T::TsLibIndex => library::TS_LIB_INDEX.into(),
        T::TsLibTest => library::TS_LIB_TEST.into(),
        T::NodeCliIndex => library::node_cli_index(c).into(),

        // Electron
        T::ElectronMain => frontend::electron_main(c).into(),
        T::ElectronPreload => frontend::ELECTRON_PRELOAD.into(),
        T::ElectronIndexHtml => frontend::ELECTRON_INDEX_HTML.into(),
        T::ElectronRenderer => frontend::ELECTRON_RENDERER.into(),

        // Monorepo
        T::TurboJson => return json(id, &frontend::turbo_json()),
        T::PnpmWorkspace => frontend::PNPM_WORKSPACE.into(),
    };
    Ok(Source::Template(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::domain::{DomainError, RawProjectConfig};
    use trellis_core::error::TrellisError;

    fn config(ty: &str, edit: impl FnOnce(&mut RawProjectConfig)) -> ProjectConfig {
        let mut raw = RawProjectConfig::new(ty, "demo-app");
        edit(&mut raw);
        raw.normalize().unwrap()
    }

    fn render(id: TemplateId, c: &ProjectConfig) -> String {
        BuiltinRenderer.render(id, c).unwrap()
    }

    #[test]
    fn project_name_is_substituted() {
        let c = config("react", |_| {});
        let html = render(TemplateId::ReactIndexHtml, &c);
        assert!(html.contains("<title>demo-app</title>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn user_text_is_not_rescanned() {
        let c = config("python", |r| r.description = Some("uses {{SECRET}} syntax".into()));
        let readme = render(TemplateId::Readme, &c);
        assert!(readme.contains("uses {{SECRET}} syntax"));
    }

    #[test]
    fn framework_mustache_passes_through() {
        let c = config("vue", |_| {});
        let hello = render(TemplateId::VueHelloWorld, &c);
        assert!(hello.contains("{{ count }}"));

        let c = config("express", |r| r.github_actions = Some(true));
        let ci = render(TemplateId::CiWorkflow, &c);
        assert!(ci.contains("node-version: 22"));
    }

    #[test]
    fn json_configs_parse() {
        let c = config("nextjs", |r| r.css_framework = Some("tailwind".into()));
        for id in [
            TemplateId::TsConfig,
            TemplateId::EslintConfig,
            TemplateId::PrettierConfig,
            TemplateId::VscodeSettings,
        ] {
            let text = render(id, &c);
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok(), "{id}: {text}");
            assert!(text.ends_with('\n'));
        }
    }

    #[test]
    fn angular_workspace_escapes_project_name() {
        let c = RawProjectConfig::new("angular", "my\"app").normalize().unwrap();

        let text = render(TemplateId::AngularJson, &c);
        let json: Value = serde_json::from_str(&text).unwrap();
        let project = &json["projects"]["my\"app"];
        assert_eq!(project["projectType"], "application");
        assert_eq!(
            project["architect"]["serve"]["configurations"]["development"]["buildTarget"],
            "my\"app:build:development"
        );
    }

    #[test]
    fn same_input_same_output() {
        let c = config("fastapi", |r| r.features = Some("jwt,large-scale".into()));
        assert_eq!(
            render(TemplateId::FastapiMain, &c),
            render(TemplateId::FastapiMain, &c)
        );
    }

    #[test]
    fn unresolved_placeholder_is_an_error() {
        let c = config("html", |_| {});
        let err = RenderContext::from_config(&c)
            .render(TemplateId::HtmlIndex, "{{NOT_A_VARIABLE}}")
            .map_err(TrellisError::from)
            .unwrap_err();
        assert!(matches!(
            err,
            TrellisError::Domain(DomainError::UnresolvedPlaceholder { .. })
        ));
    }
}
