//! `trellis init`: create a default configuration file.

use std::path::{Path, PathBuf};

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, LOCAL_CONFIG},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

const HEADER: &str = "\
# Trellis configuration.
# Every key can also be set through the environment, e.g.
# TRELLIS_DEFAULTS__AUTHOR=\"Jane Doe\".

";

/// Create a default Trellis configuration file.
pub fn execute(args: InitArgs, global: &GlobalArgs, output: OutputManager) -> CliResult<()> {
    let config_path = target_path(&args, global.config.as_deref());

    output.info(&format!("Initialising configuration at {}", config_path.display()))?;
    let written = write_default(&config_path, args.force)?;
    output.success(&format!("Configuration created at {}", written.display()))?;

    Ok(())
}

fn target_path(args: &InitArgs, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None if args.local => PathBuf::from(LOCAL_CONFIG),
        None => AppConfig::config_path(None),
    }
}

/// Write the default config to `path`, refusing to clobber unless `force`.
fn write_default(path: &Path, force: bool) -> CliResult<PathBuf> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.to_path_buf(),
        });
    }

    let toml = AppConfig::default()
        .to_toml()
        .with_cli_context(|| "failed to serialise default config")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("failed to create {}", parent.display()))?;
    }

    std::fs::write(path, format!("{HEADER}{toml}"))
        .with_cli_context(|| format!("failed to write {}", path.display()))?;

    Ok(path.to_path_buf())
}
