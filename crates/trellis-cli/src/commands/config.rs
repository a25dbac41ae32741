//! `trellis config`: inspect configuration values.

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config
                .get(&key)
                .ok_or(CliError::UnknownConfigKey { key })?;
            output.raw(&value)?;
        }

        ConfigCommands::List => {
            let serialised = config
                .to_toml()
                .with_cli_context(|| "failed to serialise config")?;
            output.raw(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            let path = AppConfig::config_path(global.config.as_deref());
            output.raw(&path.display().to_string())?;
        }
    }

    Ok(())
}
