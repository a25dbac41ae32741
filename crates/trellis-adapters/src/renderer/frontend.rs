//! Browser and desktop templates: static site, React, Next.js, Vue, Nuxt,
//! SvelteKit, Angular, Electron and the Turborepo root.

use serde_json::{Map, Value, json};
use trellis_core::domain::{FeatureTag, ProjectConfig};

// ── Static site ──────────────────────────────────────────────────────────────

pub(super) fn html_index(c: &ProjectConfig) -> String {
    let main_class = if c.uses_tailwind() {
        " class=\"mx-auto max-w-3xl p-8\""
    } else {
        ""
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <meta name="description" content="{{{{DESCRIPTION_OR_NAME}}}}" />
    <title>{{{{PROJECT_NAME}}}}</title>
    <link rel="stylesheet" href="css/style.css" />
  </head>
  <body>
    <main{main_class}>
      <h1>{{{{PROJECT_NAME}}}}</h1>
      <p>{{{{DESCRIPTION_OR_NAME}}}}</p>
      <button id="counter" type="button">Clicked 0 times</button>
    </main>
    <script src="js/main.js"></script>
  </body>
</html>
"#
    )
}

pub(super) const HTML_STYLES: &str = "\
:root {
  font-family: system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif;
  line-height: 1.5;
}

body {
  margin: 0;
  min-height: 100vh;
}

main {
  max-width: 48rem;
  margin: 0 auto;
  padding: 2rem;
}

button {
  padding: 0.5rem 1rem;
  border-radius: 0.375rem;
  cursor: pointer;
}
";

pub(super) const HTML_SCRIPT: &str = "\
const button = document.getElementById('counter');
let count = 0;

button.addEventListener('click', () => {
  count += 1;
  button.textContent = `Clicked ${count} times`;
});
";

pub(super) const ROBOTS_TXT: &str = "User-agent: *\nAllow: /\n";

// ── React ────────────────────────────────────────────────────────────────────

pub(super) const REACT_VITE_CONFIG: &str = "\
import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
  server: {
    port: 3000,
  },
});
";

/// Test setup lives beside the unit tests, not under `src/`.
pub(super) const REACT_VITEST_CONFIG: &str = "\
import { defineConfig } from 'vitest/config';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
  test: {
    environment: 'jsdom',
    globals: true,
    setupFiles: './tests/setup.{{SCRIPT_EXT}}',
  },
});
";

pub(super) fn react_index_html(_c: &ProjectConfig) -> String {
    "<!DOCTYPE html>
<html lang=\"en\">
  <head>
    <meta charset=\"UTF-8\" />
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />
    <meta name=\"description\" content=\"{{DESCRIPTION_OR_NAME}}\" />
    <title>{{PROJECT_NAME}}</title>
  </head>
  <body>
    <div id=\"root\"></div>
    <script type=\"module\" src=\"/src/main.{{COMPONENT_EXT}}\"></script>
  </body>
</html>
"
    .to_string()
}

pub(super) fn react_main(c: &ProjectConfig) -> String {
    let redux = c.has(FeatureTag::Redux);
    let query = c.has(FeatureTag::TanstackQuery);
    let router = c.has(FeatureTag::ReactRouter);

    let mut out = String::from("import React from 'react';\nimport ReactDOM from 'react-dom/client';\n");
    if router {
        out.push_str("import { BrowserRouter } from 'react-router-dom';\n");
    }
    if redux {
        out.push_str("import { Provider } from 'react-redux';\nimport { store } from './store';\n");
    }
    if query {
        out.push_str(
            "import { QueryClientProvider } from '@tanstack/react-query';\nimport { queryClient } from './lib/queryClient';\n",
        );
    }
    out.push_str("import App from './App';\nimport './styles/globals.css';\n\n");

    let mut tree = String::from("<App />");
    if router {
        tree = format!("<BrowserRouter>{tree}</BrowserRouter>");
    }
    if query {
        tree = format!("<QueryClientProvider client={{queryClient}}>{tree}</QueryClientProvider>");
    }
    if redux {
        tree = format!("<Provider store={{store}}>{tree}</Provider>");
    }

    let root = if c.is_typescript() {
        "document.getElementById('root')!"
    } else {
        "document.getElementById('root')"
    };
    out.push_str(&format!(
        "ReactDOM.createRoot({root}).render(\n  <React.StrictMode>\n    {tree}\n  </React.StrictMode>,\n);\n"
    ));
    out
}

pub(super) fn react_app(c: &ProjectConfig) -> String {
    let zustand = c.has(FeatureTag::Zustand);
    let router = c.has(FeatureTag::ReactRouter);
    let tw = c.uses_tailwind();

    let mut out = String::new();
    if zustand {
        out.push_str("import { useStore } from './store/useStore';\n");
    } else {
        out.push_str("import { useState } from 'react';\n");
    }
    if router {
        out.push_str("import { Route, Routes } from 'react-router-dom';\n");
    }
    out.push('\n');

    let (main_class, button_class) = if tw {
        (
            " className=\"mx-auto max-w-3xl p-8\"",
            " className=\"rounded bg-blue-600 px-4 py-2 text-white\"",
        )
    } else {
        ("", "")
    };

    let counter = if zustand {
        "  const count = useStore((state) => state.count);\n  const increment = useStore((state) => state.increment);\n"
    } else {
        "  const [count, setCount] = useState(0);\n  const increment = () => setCount((c) => c + 1);\n"
    };

    let body = format!(
        "      <h1>{{{{PROJECT_NAME}}}}</h1>\n      <p>{{{{DESCRIPTION_OR_NAME}}}}</p>\n      <button type=\"button\"{button_class} onClick={{increment}}>\n        count is {{count}}\n      </button>\n"
    );
    let home = if router {
        format!(
            "      <Routes>\n        <Route\n          path=\"/\"\n          element={{\n            <>\n{}            </>\n          }}\n        />\n      </Routes>\n",
            body.lines().map(|l| format!("      {l}\n")).collect::<String>()
        )
    } else {
        body
    };

    out.push_str(&format!(
        "function App() {{\n{counter}\n  return (\n    <main{main_class}>\n{home}    </main>\n  );\n}}\n\nexport default App;\n"
    ));
    out
}

pub(super) const REACT_APP_TEST: &str = "\
import { render, screen } from '@testing-library/react';
import App from '../../src/App';

describe('App', () => {
  it('renders the project name', () => {
    render(<App />);
    expect(screen.getByRole('heading')).toBeInTheDocument();
  });
});
";

pub(super) const VITE_ENV_DTS: &str = "/// <reference types=\"vite/client\" />\n";

pub(super) fn zustand_store(c: &ProjectConfig) -> String {
    if c.is_typescript() {
        "\
import { create } from 'zustand';

interface CounterState {
  count: number;
  increment: () => void;
  reset: () => void;
}

export const useStore = create<CounterState>()((set) => ({
  count: 0,
  increment: () => set((state) => ({ count: state.count + 1 })),
  reset: () => set({ count: 0 }),
}));
"
        .to_string()
    } else {
        "\
import { create } from 'zustand';

export const useStore = create((set) => ({
  count: 0,
  increment: () => set((state) => ({ count: state.count + 1 })),
  reset: () => set({ count: 0 }),
}));
"
        .to_string()
    }
}

pub(super) fn redux_store(c: &ProjectConfig) -> String {
    let mut out = String::from(
        "\
import { configureStore, createSlice } from '@reduxjs/toolkit';

const counterSlice = createSlice({
  name: 'counter',
  initialState: { value: 0 },
  reducers: {
    increment: (state) => {
      state.value += 1;
    },
    reset: (state) => {
      state.value = 0;
    },
  },
});

export const { increment, reset } = counterSlice.actions;

export const store = configureStore({
  reducer: {
    counter: counterSlice.reducer,
  },
});
",
    );
    if c.is_typescript() {
        out.push_str(
            "\nexport type RootState = ReturnType<typeof store.getState>;\nexport type AppDispatch = typeof store.dispatch;\n",
        );
    }
    out
}

pub(super) const QUERY_CLIENT: &str = "\
import { QueryClient } from '@tanstack/react-query';

export const queryClient = new QueryClient({
  defaultOptions: {
    queries: {
      staleTime: 60 * 1000,
      retry: 1,
    },
  },
});
";

// ── Next.js ──────────────────────────────────────────────────────────────────

pub(super) const NEXT_CONFIG: &str = "\
/** @type {import('next').NextConfig} */
const nextConfig = {
  reactStrictMode: true,
};

export default nextConfig;
";

pub(super) fn next_layout(c: &ProjectConfig) -> String {
    if c.is_typescript() {
        "\
import type { Metadata } from 'next';
import './globals.css';

export const metadata: Metadata = {
  title: '{{PROJECT_NAME}}',
  description: '{{DESCRIPTION_OR_NAME}}',
};

export default function RootLayout({ children }: { children: React.ReactNode }) {
  return (
    <html lang=\"en\">
      <body>{children}</body>
    </html>
  );
}
"
        .to_string()
    } else {
        "\
import './globals.css';

export const metadata = {
  title: '{{PROJECT_NAME}}',
  description: '{{DESCRIPTION_OR_NAME}}',
};

export default function RootLayout({ children }) {
  return (
    <html lang=\"en\">
      <body>{children}</body>
    </html>
  );
}
"
        .to_string()
    }
}

pub(super) fn next_page(c: &ProjectConfig) -> String {
    let (main_class, title_class) = if c.uses_tailwind() {
        (
            " className=\"flex min-h-screen flex-col items-center justify-center gap-4 p-24\"",
            " className=\"text-4xl font-bold\"",
        )
    } else {
        ("", "")
    };
    format!(
        "export default function Home() {{\n  return (\n    <main{main_class}>\n      <h1{title_class}>{{{{PROJECT_NAME}}}}</h1>\n      <p>{{{{DESCRIPTION_OR_NAME}}}}</p>\n    </main>\n  );\n}}\n"
    )
}

pub(super) const NEXT_ENV_DTS: &str = "\
/// <reference types=\"next\" />
/// <reference types=\"next/image-types/global\" />

// NOTE: This file should not be edited
// see https://nextjs.org/docs/basic-features/typescript for more information.
";

pub(super) fn next_utils(c: &ProjectConfig) -> String {
    match (c.uses_tailwind(), c.is_typescript()) {
        (true, true) => "\
import { type ClassValue, clsx } from 'clsx';
import { twMerge } from 'tailwind-merge';

export function cn(...inputs: ClassValue[]) {
  return twMerge(clsx(inputs));
}
"
        .to_string(),
        (true, false) => "\
import { clsx } from 'clsx';
import { twMerge } from 'tailwind-merge';

export function cn(...inputs) {
  return twMerge(clsx(inputs));
}
"
        .to_string(),
        (false, true) => "\
import { type ClassValue, clsx } from 'clsx';

export function cn(...inputs: ClassValue[]) {
  return clsx(inputs);
}
"
        .to_string(),
        (false, false) => "\
import { clsx } from 'clsx';

export function cn(...inputs) {
  return clsx(inputs);
}
"
        .to_string(),
    }
}

pub(super) const NEXT_AUTH_ROUTE: &str = "\
import NextAuth from 'next-auth';
import GithubProvider from 'next-auth/providers/github';

const handler = NextAuth({
  providers: [
    GithubProvider({
      clientId: process.env.GITHUB_ID ?? '',
      clientSecret: process.env.GITHUB_SECRET ?? '',
    }),
  ],
});

export { handler as GET, handler as POST };
";

// ── Vue ──────────────────────────────────────────────────────────────────────

pub(super) const VUE_VITE_CONFIG: &str = "\
import { fileURLToPath, URL } from 'node:url';
import { defineConfig } from 'vite';
import vue from '@vitejs/plugin-vue';

export default defineConfig({
  plugins: [vue()],
  resolve: {
    alias: {
      '@': fileURLToPath(new URL('./src', import.meta.url)),
    },
  },
  server: {
    port: 3000,
  },
});
";

pub(super) fn vue_index_html(_c: &ProjectConfig) -> String {
    "<!DOCTYPE html>
<html lang=\"en\">
  <head>
    <meta charset=\"UTF-8\" />
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />
    <title>{{PROJECT_NAME}}</title>
  </head>
  <body>
    <div id=\"app\"></div>
    <script type=\"module\" src=\"/src/main.{{SCRIPT_EXT}}\"></script>
  </body>
</html>
"
    .to_string()
}

pub(super) fn vue_main(c: &ProjectConfig) -> String {
    let pinia = c.has(FeatureTag::Pinia);
    let router = c.has(FeatureTag::VueRouter);

    let mut out = String::from("import { createApp } from 'vue';\n");
    if pinia {
        out.push_str("import { createPinia } from 'pinia';\n");
    }
    if router {
        out.push_str("import router from './router';\n");
    }
    out.push_str("import App from './App.vue';\nimport './style.css';\n\nconst app = createApp(App);\n\n");
    if pinia {
        out.push_str("app.use(createPinia());\n");
    }
    if router {
        out.push_str("app.use(router);\n");
    }
    out.push_str("app.mount('#app');\n");
    out
}

fn script_setup(c: &ProjectConfig) -> &'static str {
    if c.is_typescript() {
        "<script setup lang=\"ts\">"
    } else {
        "<script setup>"
    }
}

pub(super) fn vue_app(c: &ProjectConfig) -> String {
    let view = if c.has(FeatureTag::VueRouter) {
        "    <RouterView />\n"
    } else {
        ""
    };
    format!(
        "{}\nimport HelloWorld from './components/HelloWorld.vue';\n</script>\n\n<template>\n  <main>\n    <HelloWorld msg=\"{{{{PROJECT_NAME}}}}\" />\n{view}  </main>\n</template>\n\n<style scoped>\nmain {{\n  max-width: 48rem;\n  margin: 0 auto;\n  padding: 2rem;\n}}\n</style>\n",
        script_setup(c)
    )
}

pub(super) fn vue_hello_world(c: &ProjectConfig) -> String {
    let props = if c.is_typescript() {
        "defineProps<{ msg: string }>();\n"
    } else {
        "defineProps({ msg: String });\n"
    };

    let (imports, state, bump) = if c.has(FeatureTag::Pinia) {
        (
            "import { storeToRefs } from 'pinia';\nimport { useCounterStore } from '../stores/counter';\n\n",
            "const store = useCounterStore();\nconst { count } = storeToRefs(store);\n",
            "store.increment()",
        )
    } else {
        ("import { ref } from 'vue';\n\n", "const count = ref(0);\n", "count++")
    };

    format!(
        "{}\n{imports}{props}\n{state}</script>\n\n<template>\n  <h1>{{{{ msg }}}}</h1>\n  <p>{{{{DESCRIPTION_OR_NAME}}}}</p>\n  <button type=\"button\" @click=\"{bump}\">count is {{{{ count }}}}</button>\n</template>\n",
        script_setup(c)
    )
}

pub(super) const VUE_ROUTER: &str = "\
import { createRouter, createWebHistory } from 'vue-router';
import HelloWorld from '../components/HelloWorld.vue';

const router = createRouter({
  history: createWebHistory(),
  routes: [{ path: '/', name: 'home', component: HelloWorld }],
});

export default router;
";

/// Plain setup-store syntax, valid as both JavaScript and TypeScript.
pub(super) const PINIA_STORE: &str = "\
import { defineStore } from 'pinia';
import { computed, ref } from 'vue';

export const useCounterStore = defineStore('counter', () => {
  const count = ref(0);
  const doubled = computed(() => count.value * 2);

  function increment() {
    count.value += 1;
  }

  return { count, doubled, increment };
});
";

pub(super) const VUE_ENV_DTS: &str = "\
/// <reference types=\"vite/client\" />

declare module '*.vue' {
  import type { DefineComponent } from 'vue';
  const component: DefineComponent<object, object, unknown>;
  export default component;
}
";

// ── Nuxt ─────────────────────────────────────────────────────────────────────

pub(super) fn nuxt_config(c: &ProjectConfig) -> String {
    let mut modules = Vec::new();
    if c.uses_tailwind() {
        modules.push("'@nuxtjs/tailwindcss'");
    }
    if c.has(FeatureTag::Pinia) {
        modules.push("'@pinia/nuxt'");
    }
    format!(
        "export default defineNuxtConfig({{\n  devtools: {{ enabled: true }},\n  modules: [{}],\n  app: {{\n    head: {{\n      title: '{{{{PROJECT_NAME}}}}',\n    }},\n  }},\n}});\n",
        modules.join(", ")
    )
}

pub(super) const NUXT_APP: &str = "\
<template>
  <div>
    <NuxtPage />
  </div>
</template>
";

pub(super) const NUXT_INDEX_PAGE: &str = "\
<script setup lang=\"ts\">
const count = ref(0);
</script>

<template>
  <main>
    <h1>{{PROJECT_NAME}}</h1>
    <p>{{DESCRIPTION_OR_NAME}}</p>
    <button type=\"button\" @click=\"count++\">count is {{ count }}</button>
  </main>
</template>
";

// ── SvelteKit ────────────────────────────────────────────────────────────────

pub(super) const SVELTE_CONFIG: &str = "\
import adapter from '@sveltejs/adapter-auto';
import { vitePreprocess } from '@sveltejs/vite-plugin-svelte';

/** @type {import('@sveltejs/kit').Config} */
const config = {
  preprocess: vitePreprocess(),
  kit: {
    adapter: adapter(),
  },
};

export default config;
";

pub(super) const SVELTE_VITE_CONFIG: &str = "\
import { sveltekit } from '@sveltejs/kit/vite';
import { defineConfig } from 'vite';

export default defineConfig({
  plugins: [sveltekit()],
});
";

pub(super) const SVELTE_APP_HTML: &str = "\
<!doctype html>
<html lang=\"en\">
  <head>
    <meta charset=\"utf-8\" />
    <link rel=\"icon\" href=\"%sveltekit.assets%/favicon.png\" />
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />
    %sveltekit.head%
  </head>
  <body data-sveltekit-preload-data=\"hover\">
    <div style=\"display: contents\">%sveltekit.body%</div>
  </body>
</html>
";

pub(super) const SVELTE_APP_DTS: &str = "\
// See https://kit.svelte.dev/docs/types#app
declare global {
  namespace App {
    // interface Error {}
    // interface Locals {}
    // interface PageData {}
    // interface Platform {}
  }
}

export {};
";

pub(super) fn svelte_layout(_c: &ProjectConfig) -> String {
    "<script>\n  import '../app.css';\n</script>\n\n<slot />\n".to_string()
}

pub(super) fn svelte_page(c: &ProjectConfig) -> String {
    let open = if c.is_typescript() {
        "<script lang=\"ts\">"
    } else {
        "<script>"
    };
    format!(
        "{open}\n  let count = 0;\n</script>\n\n<svelte:head>\n  <title>{{{{PROJECT_NAME}}}}</title>\n</svelte:head>\n\n<main>\n  <h1>{{{{PROJECT_NAME}}}}</h1>\n  <p>{{{{DESCRIPTION_OR_NAME}}}}</p>\n  <button type=\"button\" on:click={{() => count++}}>count is {{count}}</button>\n</main>\n"
    )
}

// ── Angular ──────────────────────────────────────────────────────────────────

/// Built with the real project name: serialized JSON is not passed through
/// placeholder substitution.
pub(super) fn angular_json(c: &ProjectConfig) -> Value {
    let name = c.name();
    let mut architect = json!({
        "build": {
            "builder": "@angular-devkit/build-angular:application",
            "options": {
                "outputPath": format!("dist/{name}"),
                "index": "src/index.html",
                "browser": "src/main.ts",
                "polyfills": ["zone.js"],
                "tsConfig": "tsconfig.app.json",
                "assets": ["src/assets"],
                "styles": ["src/styles.css"],
                "scripts": []
            },
            "configurations": {
                "production": { "outputHashing": "all" },
                "development": {
                    "optimization": false,
                    "extractLicenses": false,
                    "sourceMap": true
                }
            },
            "defaultConfiguration": "production"
        },
        "serve": {
            "builder": "@angular-devkit/build-angular:dev-server",
            "configurations": {
                "production": { "buildTarget": format!("{name}:build:production") },
                "development": { "buildTarget": format!("{name}:build:development") }
            },
            "defaultConfiguration": "development"
        }
    });
    if c.toggles().testing {
        architect["test"] = json!({
            "builder": "@angular-devkit/build-angular:karma",
            "options": {
                "polyfills": ["zone.js", "zone.js/testing"],
                "tsConfig": "tsconfig.app.json",
                "assets": ["src/assets"],
                "styles": ["src/styles.css"]
            }
        });
    }

    let mut projects = Map::new();
    projects.insert(
        name.to_string(),
        json!({
            "projectType": "application",
            "root": "",
            "sourceRoot": "src",
            "prefix": "app",
            "architect": architect
        }),
    );

    json!({
        "$schema": "./node_modules/@angular/cli/lib/config/schema.json",
        "version": 1,
        "newProjectRoot": "projects",
        "projects": projects
    })
}

pub(super) fn tsconfig_app() -> Value {
    json!({
        "extends": "./tsconfig.json",
        "compilerOptions": {
            "outDir": "./out-tsc/app",
            "types": []
        },
        "files": ["src/main.ts"],
        "include": ["src/**/*.d.ts"]
    })
}

pub(super) const ANGULAR_INDEX_HTML: &str = "\
<!doctype html>
<html lang=\"en\">
  <head>
    <meta charset=\"utf-8\" />
    <title>{{PROJECT_NAME}}</title>
    <base href=\"/\" />
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />
  </head>
  <body>
    <app-root></app-root>
  </body>
</html>
";

pub(super) const ANGULAR_MAIN: &str = "\
import { bootstrapApplication } from '@angular/platform-browser';
import { AppComponent } from './app/app.component';
import { appConfig } from './app/app.config';

bootstrapApplication(AppComponent, appConfig).catch((err) => console.error(err));
";

pub(super) const ANGULAR_APP_COMPONENT: &str = "\
import { Component } from '@angular/core';
import { RouterOutlet } from '@angular/router';

@Component({
  selector: 'app-root',
  standalone: true,
  imports: [RouterOutlet],
  template: `
    <main>
      <h1>{{ title }}</h1>
      <button type=\"button\" (click)=\"count = count + 1\">count is {{ count }}</button>
      <router-outlet />
    </main>
  `,
})
export class AppComponent {
  title = '{{PROJECT_NAME}}';
  count = 0;
}
";

pub(super) const ANGULAR_APP_CONFIG: &str = "\
import { ApplicationConfig } from '@angular/core';
import { provideRouter } from '@angular/router';
import { routes } from './app.routes';

export const appConfig: ApplicationConfig = {
  providers: [provideRouter(routes)],
};
";

pub(super) const ANGULAR_ROUTES: &str = "\
import { Routes } from '@angular/router';

export const routes: Routes = [];
";

// ── Electron ─────────────────────────────────────────────────────────────────

/// TypeScript builds into `dist/` while `index.html` stays in `src/`.
pub(super) fn electron_main(c: &ProjectConfig) -> String {
    let (imports, window_type, page) = if c.is_typescript() {
        (
            "import { app, BrowserWindow } from 'electron';\nimport * as path from 'path';\n",
            ": void",
            "path.join(__dirname, '..', 'src', 'index.html')",
        )
    } else {
        (
            "const { app, BrowserWindow } = require('electron');\nconst path = require('path');\n",
            "",
            "path.join(__dirname, 'index.html')",
        )
    };
    format!(
        "{imports}
function createWindow(){window_type} {{
  const win = new BrowserWindow({{
    width: 1024,
    height: 768,
    title: '{{{{PROJECT_NAME}}}}',
    webPreferences: {{
      preload: path.join(__dirname, 'preload.js'),
      contextIsolation: true,
      nodeIntegration: false,
    }},
  }});

  win.loadFile({page});
}}

app.whenReady().then(() => {{
  createWindow();

  app.on('activate', () => {{
    if (BrowserWindow.getAllWindows().length === 0) createWindow();
  }});
}});

app.on('window-all-closed', () => {{
  if (process.platform !== 'darwin') app.quit();
}});
"
    )
}

pub(super) const ELECTRON_PRELOAD: &str = "\
const { contextBridge } = require('electron');

contextBridge.exposeInMainWorld('versions', {
  node: () => process.versions.node,
  chrome: () => process.versions.chrome,
  electron: () => process.versions.electron,
});
";

pub(super) const ELECTRON_INDEX_HTML: &str = "\
<!DOCTYPE html>
<html lang=\"en\">
  <head>
    <meta charset=\"UTF-8\" />
    <meta http-equiv=\"Content-Security-Policy\" content=\"default-src 'self'; script-src 'self'\" />
    <title>{{PROJECT_NAME}}</title>
  </head>
  <body>
    <h1>{{PROJECT_NAME}}</h1>
    <p id=\"versions\"></p>
    <script src=\"./renderer.js\"></script>
  </body>
</html>
";

pub(super) const ELECTRON_RENDERER: &str = "\
const info = document.getElementById('versions');
info.textContent = `Chrome ${versions.chrome()}, Node ${versions.node()}, Electron ${versions.electron()}`;
";

// ── Monorepo ─────────────────────────────────────────────────────────────────

pub(super) fn turbo_json() -> Value {
    json!({
        "$schema": "https://turbo.build/schema.json",
        "pipeline": {
            "build": {
                "dependsOn": ["^build"],
                "outputs": ["dist/**", ".next/**", "!.next/cache/**"]
            },
            "dev": { "cache": false, "persistent": true },
            "lint": {},
            "test": { "dependsOn": ["^build"] }
        }
    })
}

pub(super) const PNPM_WORKSPACE: &str = "packages:\n  - 'apps/*'\n  - 'packages/*'\n";
