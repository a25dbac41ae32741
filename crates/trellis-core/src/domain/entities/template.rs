//! Template identity and placeholder substitution.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  TemplateId (closed enum)                    │
//! │    └─ one id per generated source/tool file  │
//! ├──────────────────────────────────────────────┤
//! │  RenderContext (value object)                │
//! │    └─ {{VARIABLE}} map derived from config   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The text behind each id lives outside the domain, behind the
//! `TemplateRenderer` port. The domain only fixes the set of ids and the
//! substitution rules, so any renderer stays deterministic.

use std::collections::HashMap;

use crate::domain::{entities::project_config::ProjectConfig, error::DomainError};

// ============================================================================
// Template Identity
// ============================================================================

/// Every template a generator can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    // Shared tooling
    GitignoreNode,
    GitignorePython,
    EnvExampleNode,
    EnvExamplePython,
    Readme,
    VscodeSettings,
    CiWorkflow,
    Dockerfile,
    Dockerignore,
    DockerCompose,
    PrettierConfig,
    EslintConfig,
    TsConfig,
    TailwindConfig,
    PostcssConfig,
    GlobalCss,
    VitestConfig,
    VitestSetup,
    TsupConfig,
    RuffConfig,
    Pyproject,
    PythonPackageInit,
    Gitkeep,

    // Static site
    HtmlIndex,
    HtmlStyles,
    HtmlScript,
    RobotsTxt,

    // React
    ReactViteConfig,
    ReactIndexHtml,
    ReactMain,
    ReactApp,
    ReactAppTest,
    ViteEnvDts,
    ZustandStore,
    ReduxStore,
    QueryClient,

    // Next.js
    NextConfig,
    NextLayout,
    NextPage,
    NextEnvDts,
    NextUtils,
    NextAuthRoute,
    PrismaSchema,
    PrismaClient,

    // Vue / Nuxt
    VueViteConfig,
    VueIndexHtml,
    VueMain,
    VueApp,
    VueHelloWorld,
    VueRouter,
    PiniaStore,
    VueEnvDts,
    NuxtConfig,
    NuxtApp,
    NuxtIndexPage,

    // SvelteKit
    SvelteConfig,
    SvelteViteConfig,
    SvelteAppHtml,
    SvelteAppDts,
    SvelteLayout,
    SveltePage,

    // Angular
    AngularJson,
    TsConfigApp,
    AngularIndexHtml,
    AngularMain,
    AngularAppComponent,
    AngularAppConfig,
    AngularRoutes,

    // Express / NestJS
    ExpressIndex,
    ExpressRoutes,
    ExpressErrorHandler,
    ExpressDatabase,
    ExpressSwagger,
    ExpressAppTest,
    NestCliJson,
    TsConfigBuild,
    NestMain,
    NestAppModule,
    NestAppController,
    NestAppService,
    NestControllerSpec,

    // FastAPI
    FastapiMain,
    FastapiSettings,
    FastapiRouter,
    FastapiSession,
    FastapiBase,
    FastapiSecurity,
    CeleryWorker,
    AlembicIni,
    AlembicEnv,
    FastapiTest,

    // Django
    DjangoManage,
    DjangoSettings,
    DjangoUrls,
    DjangoWsgi,
    DjangoAsgi,
    DjangoCelery,
    DjangoPytestIni,
    DjangoTest,

    // Flask
    FlaskFactory,
    FlaskRoutes,
    FlaskConfig,
    FlaskWsgi,
    FlaskTest,

    // Libraries and CLIs
    PythonLibCore,
    PythonLibTest,
    PythonCliMain,
    PythonCliTest,
    TsLibIndex,
    TsLibTest,
    NodeCliIndex,

    // Electron
    ElectronMain,
    ElectronPreload,
    ElectronIndexHtml,
    ElectronRenderer,

    // Monorepo
    TurboJson,
    PnpmWorkspace,
}

impl TemplateId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GitignoreNode => "gitignore-node",
            Self::GitignorePython => "gitignore-python",
            Self::EnvExampleNode => "env-example-node",
            Self::EnvExamplePython => "env-example-python",
            Self::Readme => "readme",
            Self::VscodeSettings => "vscode-settings",
            Self::CiWorkflow => "ci-workflow",
            Self::Dockerfile => "dockerfile",
            Self::Dockerignore => "dockerignore",
            Self::DockerCompose => "docker-compose",
            Self::PrettierConfig => "prettier-config",
            Self::EslintConfig => "eslint-config",
            Self::TsConfig => "tsconfig",
            Self::TailwindConfig => "tailwind-config",
            Self::PostcssConfig => "postcss-config",
            Self::GlobalCss => "global-css",
            Self::VitestConfig => "vitest-config",
            Self::VitestSetup => "vitest-setup",
            Self::TsupConfig => "tsup-config",
            Self::RuffConfig => "ruff-config",
            Self::Pyproject => "pyproject",
            Self::PythonPackageInit => "python-package-init",
            Self::Gitkeep => "gitkeep",
            Self::HtmlIndex => "html-index",
            Self::HtmlStyles => "html-styles",
            Self::HtmlScript => "html-script",
            Self::RobotsTxt => "robots-txt",
            Self::ReactViteConfig => "react-vite-config",
            Self::ReactIndexHtml => "react-index-html",
            Self::ReactMain => "react-main",
            Self::ReactApp => "react-app",
            Self::ReactAppTest => "react-app-test",
            Self::ViteEnvDts => "vite-env-dts",
            Self::ZustandStore => "zustand-store",
            Self::ReduxStore => "redux-store",
            Self::QueryClient => "query-client",
            Self::NextConfig => "next-config",
            Self::NextLayout => "next-layout",
            Self::NextPage => "next-page",
            Self::NextEnvDts => "next-env-dts",
            Self::NextUtils => "next-utils",
            Self::NextAuthRoute => "next-auth-route",
            Self::PrismaSchema => "prisma-schema",
            Self::PrismaClient => "prisma-client",
            Self::VueViteConfig => "vue-vite-config",
            Self::VueIndexHtml => "vue-index-html",
            Self::VueMain => "vue-main",
            Self::VueApp => "vue-app",
            Self::VueHelloWorld => "vue-hello-world",
            Self::VueRouter => "vue-router",
            Self::PiniaStore => "pinia-store",
            Self::VueEnvDts => "vue-env-dts",
            Self::NuxtConfig => "nuxt-config",
            Self::NuxtApp => "nuxt-app",
            Self::NuxtIndexPage => "nuxt-index-page",
            Self::SvelteConfig => "svelte-config",
            Self::SvelteViteConfig => "svelte-vite-config",
            Self::SvelteAppHtml => "svelte-app-html",
            Self::SvelteAppDts => "svelte-app-dts",
            Self::SvelteLayout => "svelte-layout",
            Self::SveltePage => "svelte-page",
            Self::AngularJson => "angular-json",
            Self::TsConfigApp => "tsconfig-app",
            Self::AngularIndexHtml => "angular-index-html",
            Self::AngularMain => "angular-main",
            Self::AngularAppComponent => "angular-app-component",
            Self::AngularAppConfig => "angular-app-config",
            Self::AngularRoutes => "angular-routes",
            Self::ExpressIndex => "express-index",
            Self::ExpressRoutes => "express-routes",
            Self::ExpressErrorHandler => "express-error-handler",
            Self::ExpressDatabase => "express-database",
            Self::ExpressSwagger => "express-swagger",
            Self::ExpressAppTest => "express-app-test",
            Self::NestCliJson => "nest-cli-json",
            Self::TsConfigBuild => "tsconfig-build",
            Self::NestMain => "nest-main",
            Self::NestAppModule => "nest-app-module",
            Self::NestAppController => "nest-app-controller",
            Self::NestAppService => "nest-app-service",
            Self::NestControllerSpec => "nest-controller-spec",
            Self::FastapiMain => "fastapi-main",
            Self::FastapiSettings => "fastapi-settings",
            Self::FastapiRouter => "fastapi-router",
            Self::FastapiSession => "fastapi-session",
            Self::FastapiBase => "fastapi-base",
            Self::FastapiSecurity => "fastapi-security",
            Self::CeleryWorker => "celery-worker",
            Self::AlembicIni => "alembic-ini",
            Self::AlembicEnv => "alembic-env",
            Self::FastapiTest => "fastapi-test",
            Self::DjangoManage => "django-manage",
            Self::DjangoSettings => "django-settings",
            Self::DjangoUrls => "django-urls",
            Self::DjangoWsgi => "django-wsgi",
            Self::DjangoAsgi => "django-asgi",
            Self::DjangoCelery => "django-celery",
            Self::DjangoPytestIni => "django-pytest-ini",
            Self::DjangoTest => "django-test",
            Self::FlaskFactory => "flask-factory",
            Self::FlaskRoutes => "flask-routes",
            Self::FlaskConfig => "flask-config",
            Self::FlaskWsgi => "flask-wsgi",
            Self::FlaskTest => "flask-test",
            Self::PythonLibCore => "python-lib-core",
            Self::PythonLibTest => "python-lib-test",
            Self::PythonCliMain => "python-cli-main",
            Self::PythonCliTest => "python-cli-test",
            Self::TsLibIndex => "ts-lib-index",
            Self::TsLibTest => "ts-lib-test",
            Self::NodeCliIndex => "node-cli-index",
            Self::ElectronMain => "electron-main",
            Self::ElectronPreload => "electron-preload",
            Self::ElectronIndexHtml => "electron-index-html",
            Self::ElectronRenderer => "electron-renderer",
            Self::TurboJson => "turbo-json",
            Self::PnpmWorkspace => "pnpm-workspace",
        }
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Render Context (Variable Substitution)
// ============================================================================

/// Variables available to `{{VARIABLE}}` placeholders.
///
/// | Variable | Example |
/// |----------|---------|
/// | `PROJECT_NAME` | `my-app` |
/// | `PROJECT_NAME_SNAKE` | `my_app` |
/// | `PROJECT_NAME_KEBAB` | `my-app` |
/// | `PROJECT_NAME_PASCAL` | `MyApp` |
/// | `MODULE_NAME` | `my_app` |
/// | `DESCRIPTION` | empty when unset |
/// | `DESCRIPTION_OR_NAME` | description, or the project name |
/// | `AUTHOR` | empty when unset |
/// | `LICENSE`, `VERSION` | `MIT`, `0.1.0` |
/// | `NODE_VERSION`, `PYTHON_VERSION` | `22`, `3.12` |
/// | `PACKAGE_MANAGER` | `npm` |
/// | `SCRIPT_EXT`, `COMPONENT_EXT` | `ts`, `tsx` |
///
/// Nothing here reads the clock, the environment or a random source.
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<&'static str, String>,
}

impl RenderContext {
    pub fn from_config(config: &ProjectConfig) -> Self {
        let name = config.name();
        let description_or_name = if config.description().is_empty() {
            name.to_string()
        } else {
            config.description().to_string()
        };

        let variables = HashMap::from([
            ("PROJECT_NAME", name.to_string()),
            ("PROJECT_NAME_SNAKE", to_snake_case(name)),
            ("PROJECT_NAME_KEBAB", to_kebab_case(name)),
            ("PROJECT_NAME_PASCAL", to_pascal_case(name)),
            ("MODULE_NAME", config.module_name()),
            ("DESCRIPTION", config.description().to_string()),
            ("DESCRIPTION_OR_NAME", description_or_name),
            ("AUTHOR", config.author().to_string()),
            ("LICENSE", config.license().to_string()),
            ("VERSION", config.version().to_string()),
            ("NODE_VERSION", config.node_version().to_string()),
            ("PYTHON_VERSION", config.python_version().to_string()),
            ("PACKAGE_MANAGER", config.package_manager().to_string()),
            (
                "SCRIPT_EXT",
                config.language().script_extension().to_string(),
            ),
            (
                "COMPONENT_EXT",
                config.language().component_extension().to_string(),
            ),
        ]);

        Self { variables }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Substitute every `{{VARIABLE}}` in one left-to-right pass.
    ///
    /// Substituted values are never rescanned. Brace pairs that do not hold
    /// an upper-snake identifier (`{{ count }}` in Vue, `${{ matrix.os }}` in
    /// workflow files) are copied through untouched.
    ///
    /// # Errors
    ///
    /// `UnresolvedPlaceholder` for an upper-snake key with no variable.
    pub fn render(&self, template: TemplateId, text: &str) -> Result<String, DomainError> {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let key = after
                .find("}}")
                .map(|end| &after[..end])
                .filter(|k| is_placeholder_key(k));

            match key {
                Some(key) => {
                    let value = self.get(key).ok_or_else(|| {
                        DomainError::UnresolvedPlaceholder {
                            template: template.as_str(),
                            placeholder: key.to_string(),
                        }
                    })?;
                    out.push_str(value);
                    rest = &after[key.len() + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn is_placeholder_key(key: &str) -> bool {
    key.starts_with(|c: char| c.is_ascii_uppercase())
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Split on `_`, `-`, `.`, whitespace, camelCase transitions and acronym
/// boundaries (`HTTPServer` → `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            let camel = c.is_lowercase() && next.is_uppercase();
            let acronym = c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase);
            if camel || acronym {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
