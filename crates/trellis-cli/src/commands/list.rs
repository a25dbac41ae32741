//! Implementation of the `trellis list` command.

use serde_json::json;

use trellis_core::application::{GeneratorInfo, GeneratorRegistry};

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let generators = GeneratorRegistry::builtin().list();

    match args.format {
        ListFormat::Table => {
            output.header("Available project types:")?;
            for info in &generators {
                output.print(&format!("  {:<12} {}", info.key, info.description))?;
                if !info.features.is_empty() {
                    output.detail(&format!("  {:<12} features: {}", "", info.features.join(", ")))?;
                }
            }
        }

        // JSON must be parseable even in quiet mode or a non-TTY pipe.
        ListFormat::Json => output.raw(&to_json(&generators))?,

        ListFormat::List => {
            for info in &generators {
                output.raw(info.key)?;
            }
        }
    }

    Ok(())
}

fn to_json(generators: &[GeneratorInfo]) -> String {
    let rows: Vec<_> = generators
        .iter()
        .map(|g| {
            json!({
                "type": g.key,
                "description": g.description,
                "features": g.features,
            })
        })
        .collect();
    serde_json::Value::Array(rows).to_string()
}
