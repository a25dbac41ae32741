//! Implementation of the `trellis new` command.
//!
//! Responsibility: translate CLI arguments and config defaults into a
//! `RawProjectConfig`, call the core scaffold service, and display results.
//! No business logic lives here.

use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info, instrument};

use trellis_adapters::{BuiltinRenderer, LocalFilesystem};
use trellis_core::{
    application::{ScaffoldReport, ScaffoldService},
    domain::{GenerationPlan, Language, PackageManager, ProjectConfig, ProjectType, RawProjectConfig},
    error::TrellisError,
};

use crate::{
    cli::{NewArgs, toggle},
    config::{AppConfig, Defaults},
    error::CliResult,
    output::OutputManager,
};

/// Execute the `trellis new` command.
///
/// Dispatch sequence:
/// 1. Merge flags over config defaults and normalize
/// 2. Early-exit with a plan listing if `--dry-run`
/// 3. Execute scaffolding via `ScaffoldService`
/// 4. Report ignored feature tags and print next steps
#[instrument(skip_all, fields(project = %args.name, project_type = %args.project_type))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project = build_raw_config(&args, &config.defaults)
        .normalize()
        .map_err(TrellisError::from)?;

    debug!(
        language = %project.language(),
        package_manager = %project.package_manager(),
        database = %project.database(),
        orm = %project.orm(),
        "config normalized"
    );

    let service = ScaffoldService::new(
        Box::new(BuiltinRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );

    if args.dry_run {
        let plan = service.plan(&project)?;
        return print_dry_run(&project, &plan, &args.output_dir, &output);
    }

    output.header(&format!(
        "Creating {} project '{}'...",
        project.project_type(),
        project.name()
    ))?;

    let report = service.scaffold(&project, &args.output_dir)?;
    info!(root = %report.root.display(), files = report.plan.files().len(), "project written");

    print_report(&report, &output)
}

/// Flags win over config defaults; anything still unset is left for
/// `normalize` to default.
fn build_raw_config(args: &NewArgs, defaults: &Defaults) -> RawProjectConfig {
    let mut raw = RawProjectConfig::new(&args.project_type, &args.name);

    // Python stacks ignore this and force Python.
    let language = match (args.python, args.typescript) {
        (true, _) => Language::Python,
        (_, true) => Language::TypeScript,
        _ => Language::JavaScript,
    };
    raw.language = Some(language.as_str().into());

    let python = language == Language::Python
        || ProjectType::from_str(&args.project_type).is_ok_and(|t| t.forces_python());
    raw.package_manager = args.package_manager.clone().or_else(|| {
        // A configured default only applies to its own ecosystem.
        defaults
            .package_manager
            .clone()
            .filter(|pm| PackageManager::from_str(pm).is_ok_and(|pm| pm.is_node() != python))
    });
    raw.css_framework = args.tailwind.then(|| "tailwind".into());
    raw.database = args.database.clone();
    raw.orm = args.orm.clone();

    raw.eslint = toggle(args.eslint, args.no_eslint);
    raw.prettier = toggle(args.prettier, args.no_prettier);
    raw.testing = toggle(args.testing, args.no_testing);
    raw.docker = args.docker.then_some(true);
    raw.github_actions = args.github_actions.then_some(true);
    raw.ruff = toggle(args.ruff, args.no_ruff);
    raw.mypy = toggle(args.mypy, args.no_mypy);
    raw.pytest = toggle(args.pytest, args.no_pytest);

    raw.features = args.features.clone();
    raw.description = args.description.clone();
    raw.author = args.author.clone().or_else(|| defaults.author.clone());
    raw.license = Some(args.license.clone().unwrap_or_else(|| defaults.license.clone()));
    raw.version = args.project_version.clone();
    raw.node_version = Some(defaults.node_version.clone());
    raw.python_version = Some(defaults.python_version.clone());

    raw
}

fn print_dry_run(
    project: &ProjectConfig,
    plan: &GenerationPlan,
    output_dir: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let root = output_dir.join(project.name());

    output.info(&format!("Dry run: would create {}", root.display()))?;
    if root.exists() {
        output.warning(&format!(
            "{} already exists, a real run would stop before writing",
            root.display()
        ))?;
    }

    output.print("")?;
    output.header("Directories:")?;
    for dir in plan.directories() {
        output.print(&format!("  {}/", dir.display()))?;
    }

    output.print("")?;
    output.header("Files:")?;
    for file in plan.files() {
        output.plan_file(&file.path, file.size(), file.permissions.executable_flag())?;
    }

    if !plan.scripts().is_empty() {
        output.print("")?;
        output.header("Scripts:")?;
        for (name, command) in plan.scripts().iter() {
            output.print(&format!("  {name:<16} {command}"))?;
        }
    }

    output.print("")?;
    output.detail(&format!(
        "{} files, {} bytes, nothing written",
        plan.files().len(),
        plan.total_bytes()
    ))?;
    Ok(())
}

fn print_report(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    for tag in &report.ignored_features {
        output.ignored_feature(tag)?;
    }

    output.success(&format!("Project created at {}", report.root.display()))?;
    output.next_steps(report.plan.next_steps())?;
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(project_type: &str, name: &str) -> NewArgs {
        NewArgs {
            project_type: project_type.into(),
            name: name.into(),
            output_dir: ".".into(),
            ..NewArgs::default()
        }
    }

    #[test]
    fn language_defaults_to_javascript() {
        let raw = build_raw_config(&args("react", "web"), &Defaults::default());
        let config = raw.normalize().unwrap();
        assert_eq!(config.language(), Language::JavaScript);
        assert!(!config.is_typescript());
    }

    #[test]
    fn typescript_flag_switches_language() {
        let mut a = args("react", "web");
        a.typescript = true;
        let config = build_raw_config(&a, &Defaults::default()).normalize().unwrap();
        assert_eq!(config.language(), Language::TypeScript);
    }

    #[test]
    fn python_stacks_ignore_the_language_flag() {
        let mut a = args("fastapi", "api");
        a.typescript = true;
        let config = build_raw_config(&a, &Defaults::default()).normalize().unwrap();
        assert_eq!(config.project_type(), ProjectType::FastApi);
        assert_eq!(config.language(), Language::Python);
    }

    #[test]
    fn flags_override_config_defaults() {
        let defaults = Defaults {
            author: Some("From Config".into()),
            license: "Apache-2.0".into(),
            ..Defaults::default()
        };

        let config = build_raw_config(&args("express", "api"), &defaults)
            .normalize()
            .unwrap();
        assert_eq!(config.author(), "From Config");
        assert_eq!(config.license(), "Apache-2.0");

        let mut a = args("express", "api");
        a.author = Some("From Flag".into());
        a.license = Some("ISC".into());
        let config = build_raw_config(&a, &defaults).normalize().unwrap();
        assert_eq!(config.author(), "From Flag");
        assert_eq!(config.license(), "ISC");
    }

    #[test]
    fn unset_toggles_keep_stack_defaults() {
        let config = build_raw_config(&args("react", "web"), &Defaults::default())
            .normalize()
            .unwrap();
        assert!(config.toggles().eslint);

        let mut a = args("react", "web");
        a.no_eslint = true;
        let config = build_raw_config(&a, &Defaults::default()).normalize().unwrap();
        assert!(!config.toggles().eslint);
    }

    #[test]
    fn python_flag_selects_the_python_cli() {
        let mut a = args("cli", "tool");
        a.python = true;
        let config = build_raw_config(&a, &Defaults::default()).normalize().unwrap();
        assert!(config.is_python());
        assert_eq!(config.package_manager(), PackageManager::Pip);
    }

    #[test]
    fn configured_package_manager_stays_in_its_ecosystem() {
        let defaults = Defaults {
            package_manager: Some("pnpm".into()),
            ..Defaults::default()
        };
        let node = build_raw_config(&args("express", "api"), &defaults)
            .normalize()
            .unwrap();
        assert_eq!(node.package_manager(), PackageManager::Pnpm);

        let python = build_raw_config(&args("django", "site"), &defaults)
            .normalize()
            .unwrap();
        assert_eq!(python.package_manager(), PackageManager::Pip);
    }

    #[test]
    fn tailwind_flag_sets_css_framework() {
        let mut a = args("vue", "web");
        a.tailwind = true;
        let config = build_raw_config(&a, &Defaults::default()).normalize().unwrap();
        assert!(config.uses_tailwind());
    }
}
