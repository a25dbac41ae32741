//! Diagnostics on stderr, driven by `-v`/`-q` or `RUST_LOG`.
//!
//! Stdout belongs to command output, so every event goes to stderr. What
//! each level surfaces during `trellis new`:
//!
//! | Flag(s)   | Level | Adds                                             |
//! |-----------|-------|--------------------------------------------------|
//! | `--quiet` | ERROR | nothing beyond the final error report            |
//! | (none)    | WARN  | write failures and rollback outcome              |
//! | `-v`      | INFO  | scaffold start and finish, bytes written         |
//! | `-vv`     | DEBUG | each dependency rule applied, each file written  |
//! | `-vvv`    | TRACE | every filesystem call                            |
//!
//! A set `RUST_LOG` replaces the flag-derived filter entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events the flag-derived filter lets through.
const TARGETS: [&str; 3] = ["trellis", "trellis_core", "trellis_adapters"];

/// Install the global subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(args));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn default_filter(args: &GlobalArgs) -> EnvFilter {
    let level = level_for(args);
    let directives = TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    EnvFilter::new(directives)
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
