//! Flags accepted before or after any `trellis` subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Diagnostic detail on stderr. `-v` also adds suggestions to error
    /// reports; `-vv` lists the dependency rules each generator applied.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Only warnings and errors
    -v      - Info level, plus suggestions on failure
    -vv     - Debug level (applied dependency rules)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Hides dry-run listings and creation reports. Machine output from
    /// `list --format json` and `config get` is still printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Plain output on stdout and stderr. `NO_COLOR` set to anything but an
    /// empty or falsey value (`0`, `false`, `no`, `off`) does the same.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Config file to read defaults from. Replaces both `.trellis.toml` and
    /// the platform config file; `TRELLIS_*` variables still apply on top.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,
}
