//! React (Vite) and Next.js (App Router).

use tracing::instrument;

use super::common::{
    eslint, eslint_ts, lint_configs, node_common, node_next_steps, prettier, tailwind,
    tailwind_configs, testing, ts, PlanBuilder, TAILWIND_PACKAGES, TS_ESLINT_PACKAGES,
};
use super::Generator;
use crate::{
    application::ports::TemplateRenderer,
    domain::{
        compose, CssFramework, DepGroup, DependencyRule, FeatureTag, GenerationPlan, Orm,
        PackageJson, ProjectConfig, ProjectType, Script, ScriptTable, TemplateId,
    },
    error::TrellisResult,
};

// ── React ────────────────────────────────────────────────────────────────────

const REACT_BASE: &[(&str, &str)] = &[("react", "^18.2.0"), ("react-dom", "^18.2.0")];
const REACT_BASE_DEV: &[(&str, &str)] = &[("@vitejs/plugin-react", "^4.2.0"), ("vite", "^5.0.0")];

/// Applied top to bottom; a later rule overrides an earlier one on the same
/// package.
static REACT_RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "typescript",
        group: DepGroup::Dev,
        when: ts,
        packages: &[
            ("typescript", "^5.3.0"),
            ("@types/react", "^18.2.0"),
            ("@types/react-dom", "^18.2.0"),
        ],
    },
    DependencyRule {
        name: "tailwind",
        group: DepGroup::Dev,
        when: tailwind,
        packages: TAILWIND_PACKAGES,
    },
    DependencyRule {
        name: "styled-components",
        group: DepGroup::Runtime,
        when: |c| c.css_framework() == CssFramework::StyledComponents,
        packages: &[("styled-components", "^6.1.0")],
    },
    DependencyRule {
        name: "emotion",
        group: DepGroup::Runtime,
        when: |c| c.css_framework() == CssFramework::Emotion,
        packages: &[("@emotion/react", "^11.11.0"), ("@emotion/styled", "^11.11.0")],
    },
    DependencyRule {
        name: "scss",
        group: DepGroup::Dev,
        when: |c| c.css_framework() == CssFramework::Scss,
        packages: &[("sass", "^1.69.0")],
    },
    DependencyRule {
        name: "eslint",
        group: DepGroup::Dev,
        when: eslint,
        packages: &[
            ("eslint", "^8.56.0"),
            ("eslint-plugin-react", "^7.33.0"),
            ("eslint-plugin-react-hooks", "^4.6.0"),
        ],
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
    DependencyRule {
        name: "testing",
        group: DepGroup::Dev,
        when: testing,
        packages: &[
            ("vitest", "^1.0.0"),
            ("@testing-library/react", "^14.0.0"),
            ("@testing-library/jest-dom", "^6.0.0"),
            ("jsdom", "^23.0.0"),
        ],
    },
    DependencyRule {
        name: "zustand",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::Zustand),
        packages: &[("zustand", "^4.4.0")],
    },
    DependencyRule {
        name: "redux",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::Redux),
        packages: &[("@reduxjs/toolkit", "^2.0.0"), ("react-redux", "^9.0.0")],
    },
    DependencyRule {
        name: "tanstack-query",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::TanstackQuery),
        packages: &[("@tanstack/react-query", "^5.0.0")],
    },
    DependencyRule {
        name: "react-router",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::ReactRouter),
        packages: &[("react-router-dom", "^6.20.0")],
    },
];

const REACT_DIRS: &[&str] = &[
    "public",
    "src/components/ui",
    "src/components/features",
    "src/hooks",
    "src/lib",
    "src/types",
    "src/styles",
    "tests/unit",
    "tests/e2e",
];

fn react_scripts(config: &ProjectConfig) -> ScriptTable {
    let t = config.toggles();
    let (build, lint) = if config.is_typescript() {
        ("tsc && vite build", "eslint src --ext .ts,.tsx")
    } else {
        ("vite build", "eslint src --ext .js,.jsx")
    };

    ScriptTable::from_candidates([
        ("dev", Script::run("vite")),
        ("build", Script::run(build)),
        ("preview", Script::run("vite preview")),
        ("lint", Script::when(t.eslint, lint)),
        ("format", Script::when(t.prettier, "prettier --write src")),
        ("test", Script::when(t.testing, "vitest")),
        ("test:coverage", Script::when(t.testing, "vitest --coverage")),
    ])
}

pub(crate) struct ReactGenerator;

impl Generator for ReactGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::React
    }

    fn description(&self) -> &'static str {
        "React single-page app on Vite"
    }

    fn recognized_features(&self) -> &'static [FeatureTag] {
        &[
            FeatureTag::Zustand,
            FeatureTag::Redux,
            FeatureTag::TanstackQuery,
            FeatureTag::ReactRouter,
        ]
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(REACT_BASE, REACT_BASE_DEV, config, REACT_RULES);
        let scripts = react_scripts(config);
        let steps = node_next_steps(config, &scripts);

        let mut b = PlanBuilder::new(config, renderer);
        let (ext, jsx) = (b.ext(), b.jsx());

        for dir in REACT_DIRS {
            b.dir(*dir);
        }
        b.package_json(PackageJson::for_project(config).private().esm(), manifest, scripts)?
            .render("index.html", TemplateId::ReactIndexHtml)?
            .render(format!("vite.config.{ext}"), TemplateId::ReactViteConfig)?
            .render(format!("src/main.{jsx}"), TemplateId::ReactMain)?
            .render(format!("src/App.{jsx}"), TemplateId::ReactApp)?
            .render("src/styles/globals.css", TemplateId::GlobalCss)?;

        if config.is_typescript() {
            b.render("tsconfig.json", TemplateId::TsConfig)?
                .render("src/vite-env.d.ts", TemplateId::ViteEnvDts)?;
        }
        if config.toggles().testing {
            b.render(format!("vitest.config.{ext}"), TemplateId::VitestConfig)?
                .render(format!("tests/setup.{ext}"), TemplateId::VitestSetup)?
                .render(format!("tests/unit/App.test.{jsx}"), TemplateId::ReactAppTest)?;
        }

        b.render_if(
            config.has(FeatureTag::Zustand),
            format!("src/store/useStore.{ext}"),
            TemplateId::ZustandStore,
        )?
        .render_if(
            config.has(FeatureTag::Redux),
            format!("src/store/index.{ext}"),
            TemplateId::ReduxStore,
        )?
        .render_if(
            config.has(FeatureTag::TanstackQuery),
            format!("src/lib/queryClient.{ext}"),
            TemplateId::QueryClient,
        )?;

        tailwind_configs(&mut b)?;
        lint_configs(&mut b)?;
        node_common(&mut b)?;

        Ok(b.finish(steps))
    }
}

// ── Next.js ──────────────────────────────────────────────────────────────────

const NEXT_BASE: &[(&str, &str)] = &[
    ("next", "^14.0.0"),
    ("react", "^18.2.0"),
    ("react-dom", "^18.2.0"),
    ("clsx", "^2.1.0"),
];

fn prisma(c: &ProjectConfig) -> bool {
    c.orm() == Orm::Prisma
}

static NEXT_RULES: &[DependencyRule] = &[
    DependencyRule {
        name: "typescript",
        group: DepGroup::Dev,
        when: ts,
        packages: &[
            ("typescript", "^5.3.0"),
            ("@types/react", "^18.2.0"),
            ("@types/react-dom", "^18.2.0"),
            ("@types/node", "^22.0.0"),
        ],
    },
    DependencyRule {
        name: "tailwind",
        group: DepGroup::Dev,
        when: tailwind,
        packages: TAILWIND_PACKAGES,
    },
    DependencyRule {
        name: "tailwind-merge",
        group: DepGroup::Runtime,
        when: tailwind,
        packages: &[("tailwind-merge", "^2.2.0")],
    },
    DependencyRule {
        name: "eslint",
        group: DepGroup::Dev,
        when: eslint,
        packages: &[("eslint", "^8.56.0"), ("eslint-config-next", "^14.0.0")],
    },
    DependencyRule {
        name: "prettier",
        group: DepGroup::Dev,
        when: prettier,
        packages: &[("prettier", "^3.1.0")],
    },
    DependencyRule {
        name: "prettier-tailwind",
        group: DepGroup::Dev,
        when: |c| c.toggles().prettier && c.uses_tailwind(),
        packages: &[("prettier-plugin-tailwindcss", "^0.5.0")],
    },
    DependencyRule {
        name: "testing",
        group: DepGroup::Dev,
        when: testing,
        packages: &[
            ("vitest", "^1.0.0"),
            ("@testing-library/react", "^14.0.0"),
            ("@vitejs/plugin-react", "^4.2.0"),
            ("jsdom", "^23.0.0"),
        ],
    },
    DependencyRule {
        name: "prisma-client",
        group: DepGroup::Runtime,
        when: prisma,
        packages: &[("@prisma/client", "^5.7.0")],
    },
    DependencyRule {
        name: "prisma-cli",
        group: DepGroup::Dev,
        when: prisma,
        packages: &[("prisma", "^5.7.0")],
    },
    DependencyRule {
        name: "nextauth",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::NextAuth),
        packages: &[("next-auth", "^4.24.0")],
    },
    DependencyRule {
        name: "zustand",
        group: DepGroup::Runtime,
        when: |c| c.has(FeatureTag::Zustand),
        packages: &[("zustand", "^4.4.0")],
    },
];

fn next_scripts(config: &ProjectConfig) -> ScriptTable {
    let t = config.toggles();
    let prisma = prisma(config);

    ScriptTable::from_candidates([
        ("dev", Script::run("next dev")),
        ("build", Script::run("next build")),
        ("start", Script::run("next start")),
        ("lint", Script::when(t.eslint, "next lint")),
        ("format", Script::when(t.prettier, "prettier --write .")),
        ("test", Script::when(t.testing, "vitest")),
        ("db:generate", Script::when(prisma, "prisma generate")),
        ("db:push", Script::when(prisma, "prisma db push")),
        ("db:migrate", Script::when(prisma, "prisma migrate dev")),
    ])
}

pub(crate) struct NextJsGenerator;

impl Generator for NextJsGenerator {
    fn project_type(&self) -> ProjectType {
        ProjectType::NextJs
    }

    fn description(&self) -> &'static str {
        "Next.js 14 with the App Router"
    }

    fn recognized_features(&self) -> &'static [FeatureTag] {
        &[FeatureTag::NextAuth, FeatureTag::Zustand]
    }

    #[instrument(skip_all, fields(project = %config.name()))]
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan> {
        let manifest = compose(NEXT_BASE, &[], config, NEXT_RULES);
        let scripts = next_scripts(config);
        let steps = node_next_steps(config, &scripts);

        let mut b = PlanBuilder::new(config, renderer);
        let (ext, jsx) = (b.ext(), b.jsx());
        let tsconfig = if config.is_typescript() {
            "tsconfig.json"
        } else {
            "jsconfig.json"
        };

        b.dir("public").dir("src/components");
        b.package_json(PackageJson::for_project(config).private(), manifest, scripts)?
            .render("next.config.mjs", TemplateId::NextConfig)?
            .render(tsconfig, TemplateId::TsConfig)?
            .render(format!("src/app/layout.{jsx}"), TemplateId::NextLayout)?
            .render(format!("src/app/page.{jsx}"), TemplateId::NextPage)?
            .render("src/app/globals.css", TemplateId::GlobalCss)?
            .render(format!("src/lib/utils.{ext}"), TemplateId::NextUtils)?
            .render_if(config.is_typescript(), "next-env.d.ts", TemplateId::NextEnvDts)?;

        if prisma(config) {
            b.render("prisma/schema.prisma", TemplateId::PrismaSchema)?
                .render(format!("src/lib/prisma.{ext}"), TemplateId::PrismaClient)?;
        }
        b.render_if(
            config.has(FeatureTag::NextAuth),
            format!("src/app/api/auth/[...nextauth]/route.{ext}"),
            TemplateId::NextAuthRoute,
        )?
        .render_if(
            config.has(FeatureTag::Zustand),
            format!("src/store/useStore.{ext}"),
            TemplateId::ZustandStore,
        )?;

        tailwind_configs(&mut b)?;
        lint_configs(&mut b)?;
        node_common(&mut b)?;

        Ok(b.finish(steps))
    }
}
