//! Package and command-line templates.

use trellis_core::domain::ProjectConfig;

pub(super) const PYTHON_LIB_CORE: &str = "\
\"\"\"Core functionality for {{PROJECT_NAME}}.\"\"\"


def greet(name: str) -> str:
    \"\"\"Return a greeting for ``name``.\"\"\"
    return f\"Hello, {name}!\"
";

pub(super) const PYTHON_LIB_TEST: &str = "\
from {{MODULE_NAME}} import greet


def test_greet() -> None:
    assert greet(\"world\") == \"Hello, world!\"
";

pub(super) const PYTHON_CLI_MAIN: &str = "\
import typer
from rich.console import Console

from {{MODULE_NAME}} import __version__

app = typer.Typer(help=\"{{DESCRIPTION_OR_NAME}}\")
console = Console()


@app.command()
def hello(name: str = typer.Argument(\"world\")) -> None:
    \"\"\"Say hello.\"\"\"
    console.print(f\"[bold green]Hello, {name}![/bold green]\")


@app.command()
def version() -> None:
    \"\"\"Print the version.\"\"\"
    console.print(__version__)


if __name__ == \"__main__\":
    app()
";

pub(super) const PYTHON_CLI_TEST: &str = "\
from typer.testing import CliRunner

from {{MODULE_NAME}}.cli import app

runner = CliRunner()


def test_hello() -> None:
    result = runner.invoke(app, [\"hello\", \"tester\"])
    assert result.exit_code == 0
    assert \"Hello, tester!\" in result.stdout


def test_version() -> None:
    result = runner.invoke(app, [\"version\"])
    assert result.exit_code == 0
    assert \"{{VERSION}}\" in result.stdout
";

pub(super) const TS_LIB_INDEX: &str = "\
export interface GreetOptions {
  excited?: boolean;
}

export function greet(name: string, options: GreetOptions = {}): string {
  return `Hello, ${name}${options.excited ? '!' : '.'}`;
}
";

pub(super) const TS_LIB_TEST: &str = "\
import { describe, expect, it } from 'vitest';
import { greet } from './index';

describe('greet', () => {
  it('greets by name', () => {
    expect(greet('world')).toBe('Hello, world.');
  });

  it('supports excitement', () => {
    expect(greet('world', { excited: true })).toBe('Hello, world!');
  });
});
";

/// Commander entry point. The JavaScript variant is run directly and needs
/// the shebang; tsup keeps it for the TypeScript build.
pub(super) fn node_cli_index(c: &ProjectConfig) -> String {
    let action = if c.is_typescript() {
        "(name: string)"
    } else {
        "(name)"
    };
    format!(
        "#!/usr/bin/env node
import {{ Command }} from 'commander';
import chalk from 'chalk';
import ora from 'ora';

const program = new Command();

program
  .name('{{{{PROJECT_NAME}}}}')
  .description('{{{{DESCRIPTION_OR_NAME}}}}')
  .version('{{{{VERSION}}}}');

program
  .command('hello')
  .description('Say hello')
  .argument('[name]', 'who to greet', 'world')
  .action(async {action} => {{
    const spinner = ora('Thinking...').start();
    await new Promise((resolve) => setTimeout(resolve, 300));
    spinner.stop();
    console.log(chalk.green(`Hello, ${{name}}!`));
  }});

program.parse();
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::domain::RawProjectConfig;

    #[test]
    fn node_cli_keeps_shebang_and_types_argument() {
        let mut raw = RawProjectConfig::new("cli", "shipit");
        raw.language = Some("typescript".into());
        let index = node_cli_index(&raw.normalize().unwrap());
        assert!(index.starts_with("#!/usr/bin/env node\n"));
        assert!(index.contains(".action(async (name: string) => {"));
        assert!(index.contains("`Hello, ${name}!`"));
    }
}
