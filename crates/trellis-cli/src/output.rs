//! Terminal output for `trellis` commands.
//!
//! Human-facing lines (dry-run listings, creation reports, warnings about
//! ignored feature tags) go through [`OutputManager`] and disappear under
//! `--quiet`. [`OutputManager::raw`] is the exception: it carries
//! `list --format json` and `config get` values, which scripts depend on.

use std::io;
use std::path::Path;

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Colour is off when `--no-color` is passed, `output.no_color` is set
    /// in a config file, or stdout is not a terminal.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let term = Term::stdout();
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || !term.features().colors_supported(),
            term,
        }
    }

    fn emit(&self, line: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(line)
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(msg)
    }

    /// Written even under `--quiet`.
    pub fn raw(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.emit(&self.marked('\u{2713}', msg, Tone::Good))
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.emit(&self.marked('\u{26a0}', msg, Tone::Caution))
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.emit(&self.marked('\u{2139}', msg, Tone::Neutral))
    }

    /// Section title in a dry-run listing or `trellis list`.
    pub fn header(&self, text: &str) -> io::Result<()> {
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.emit(&line)
    }

    pub fn detail(&self, text: &str) -> io::Result<()> {
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.dimmed().to_string()
        };
        self.emit(&line)
    }

    /// One planned file in a dry run: relative path, size, and whether the
    /// emitter will set the executable bit.
    pub fn plan_file(&self, path: &Path, bytes: usize, executable: bool) -> io::Result<()> {
        self.emit(&plan_file_line(path, bytes, executable, !self.no_color))
    }

    /// A feature tag the chosen stack has no rule for.
    pub fn ignored_feature(&self, tag: &str) -> io::Result<()> {
        self.warning(&format!("feature '{tag}' has no effect on this stack"))
    }

    /// Commands to run inside the new project, in plan order.
    pub fn next_steps(&self, steps: &[String]) -> io::Result<()> {
        if steps.is_empty() {
            return Ok(());
        }
        self.emit("")?;
        self.emit("Next steps:")?;
        for step in steps {
            self.emit(&format!("  {step}"))?;
        }
        Ok(())
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    fn marked(&self, mark: char, msg: &str, tone: Tone) -> String {
        if self.no_color {
            return format!("{mark} {msg}");
        }
        match tone {
            Tone::Good => format!("{} {}", mark.green().bold(), msg.green()),
            Tone::Caution => format!("{} {}", mark.yellow().bold(), msg.yellow()),
            Tone::Neutral => format!("{} {}", mark.blue().bold(), msg.blue()),
        }
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Caution,
    Neutral,
}

fn plan_file_line(path: &Path, bytes: usize, executable: bool, color: bool) -> String {
    let size = if executable {
        format!("({bytes} bytes, executable)")
    } else {
        format!("({bytes} bytes)")
    };
    if color {
        format!("  {}  {}", path.display(), size.dimmed())
    } else {
        format!("  {}  {size}", path.display())
    }
}
