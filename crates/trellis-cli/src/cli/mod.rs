//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "trellis",
    bin_name = "trellis",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Configuration-driven project scaffolding",
    long_about = "Trellis generates ready-to-run project skeletons for web, \
                  backend, library and CLI stacks from a handful of flags.",
    after_help = "EXAMPLES:\n\
        \x20 trellis new react my-app --typescript --tailwind\n\
        \x20 trellis new fastapi my-api --database postgresql --orm sqlalchemy --docker\n\
        \x20 trellis list\n\
        \x20 trellis completions bash > /usr/share/bash-completion/completions/trellis",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        disable_version_flag = true,
        after_help = "EXAMPLES:\n\
            \x20 trellis new react my-app --typescript --tailwind --features zustand,react-router\n\
            \x20 trellis new express api --database mongodb --orm mongoose --no-testing\n\
            \x20 trellis new python mylib --no-mypy --output-dir ~/src"
    )]
    New(NewArgs),

    /// List the registered project types.
    #[command(
        visible_alias = "ls",
        about = "List available project types",
        after_help = "EXAMPLES:\n\
            \x20 trellis list\n\
            \x20 trellis list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 trellis init             # platform config directory\n\
            \x20 trellis init --local     # .trellis.toml in CWD\n\
            \x20 trellis init -c my.toml  # explicit path"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 trellis completions bash > ~/.local/share/bash-completion/completions/trellis\n\
            \x20 trellis completions zsh  > ~/.zfunc/_trellis\n\
            \x20 trellis completions fish > ~/.config/fish/completions/trellis.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Trellis configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 trellis config get defaults.author\n\
            \x20 trellis config list\n\
            \x20 trellis config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

const DATABASES: [&str; 5] = ["none", "sqlite", "postgresql", "mysql", "mongodb"];

const ORMS: [&str; 9] = [
    "none",
    "prisma",
    "drizzle",
    "typeorm",
    "sequelize",
    "mongoose",
    "sqlalchemy",
    "sqlmodel",
    "tortoise",
];

/// Arguments for `trellis new`.
///
/// Tool toggles come in `--x` / `--no-x` pairs; the last one given wins and
/// leaving both out keeps the stack's default.
#[derive(Debug, Default, Args)]
pub struct NewArgs {
    /// Stack to generate, see `trellis list`.
    #[arg(value_name = "PROJECT_TYPE")]
    pub project_type: String,

    /// Project name; also the directory created under `--output-dir`.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Generate TypeScript sources.
    #[arg(long, conflicts_with = "javascript")]
    pub typescript: bool,

    /// Generate JavaScript sources (the default).
    #[arg(long, conflicts_with = "python")]
    pub javascript: bool,

    /// Generate the Python variant of `cli`; Python stacks imply it.
    #[arg(long, conflicts_with = "typescript")]
    pub python: bool,

    /// Add Tailwind CSS.
    #[arg(long)]
    pub tailwind: bool,

    #[arg(long, value_name = "DB", value_parser = DATABASES, help = "Database to wire up")]
    pub database: Option<String>,

    #[arg(long, value_name = "ORM", value_parser = ORMS, help = "ORM or ODM to use")]
    pub orm: Option<String>,

    #[arg(long, overrides_with = "no_eslint", help = "Enable ESLint")]
    pub eslint: bool,
    #[arg(long, overrides_with = "eslint", help = "Disable ESLint")]
    pub no_eslint: bool,

    #[arg(long, overrides_with = "no_prettier", help = "Enable Prettier")]
    pub prettier: bool,
    #[arg(long, overrides_with = "prettier", help = "Disable Prettier")]
    pub no_prettier: bool,

    #[arg(long, overrides_with = "no_testing", help = "Add a test runner")]
    pub testing: bool,
    #[arg(long, overrides_with = "testing", help = "Skip the test runner")]
    pub no_testing: bool,

    /// Add a Dockerfile and docker-compose.yml.
    #[arg(long)]
    pub docker: bool,

    /// Add a GitHub Actions CI workflow.
    #[arg(long = "github-actions")]
    pub github_actions: bool,

    #[arg(long, overrides_with = "no_ruff", help = "Enable ruff (Python)")]
    pub ruff: bool,
    #[arg(long, overrides_with = "ruff", help = "Disable ruff")]
    pub no_ruff: bool,

    #[arg(long, overrides_with = "no_mypy", help = "Enable mypy (Python)")]
    pub mypy: bool,
    #[arg(long, overrides_with = "mypy", help = "Disable mypy")]
    pub no_mypy: bool,

    #[arg(long, overrides_with = "no_pytest", help = "Enable pytest (Python)")]
    pub pytest: bool,
    #[arg(long, overrides_with = "pytest", help = "Disable pytest")]
    pub no_pytest: bool,

    /// Comma-separated feature tags, e.g. `zustand,react-router`.
    #[arg(long, value_name = "TAGS")]
    pub features: Option<String>,

    #[arg(long, help = "One-line project description")]
    pub description: Option<String>,

    #[arg(long, help = "Author written into manifests and the README")]
    pub author: Option<String>,

    /// License identifier [default: MIT].
    #[arg(long)]
    pub license: Option<String>,

    /// Initial project version [default: 0.1.0].
    #[arg(long = "version", id = "project_version", value_name = "VERSION")]
    pub project_version: Option<String>,

    /// npm, yarn, pnpm, bun, pip, poetry, pipenv or conda.
    #[arg(long = "package-manager", value_name = "PM")]
    pub package_manager: Option<String>,

    /// Directory the project folder is created in.
    #[arg(short = 'o', long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Collapse a `--x` / `--no-x` pair into "set", "unset" or "not given".
pub fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `trellis list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One project type per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `trellis init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.trellis.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `trellis completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `trellis config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.author`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
