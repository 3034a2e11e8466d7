//! tmask - drive a standout-mask format from the command line.
//!
//! A small host for the masking engine: it stands in for an input widget,
//! feeding typed keys or whole edited values through a compiled format and
//! printing what the widget would show.
//!
//! ```text
//! $ tmask placeholder %d/%m/%Y
//! DD/MM/YYYY
//! $ tmask type %H:%M 930
//! 09
//! 09:3
//! 09:30
//! $ printf '9\n93\n09:\n' | tmask replay %H:%M
//! 09
//! 09:3
//! 09:
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use standout_mask::{CompiledFormat, MaskedInput, MemoryHost, TokenTable, BACKSPACE};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Key that stands for a backspace in `tmask type`.
const BACKSPACE_KEY: char = '<';

#[derive(Parser, Debug)]
#[command(name = "tmask")]
#[command(about = "Type into a masked date/time field from the terminal")]
struct Cli {
    /// YAML or JSON catalog merged over the built-in field codes
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Print the placeholder of a format
    Placeholder {
        /// Template such as %H:%M
        format: String,
    },
    /// Type keys one at a time and print the value after each ('<' deletes)
    Type {
        /// Template such as %H:%M
        format: String,
        /// Keys to type
        keys: String,
    },
    /// Reformat successive values read from stdin, one per line
    Replay {
        /// Template such as %H:%M
        format: String,
    },
    /// Print the active catalog
    Catalog {
        /// Emit JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let table = load_table(cli.catalog.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Placeholder { format } => {
            let format = compile(&format, &table)?;
            writeln!(out, "{}", format.placeholder())?;
        }
        Command::Type { format, keys } => {
            let format = compile(&format, &table)?;
            type_keys(format, &keys, &mut out)?;
        }
        Command::Replay { format } => {
            let mut format = compile(&format, &table)?;
            replay(&mut format, io::stdin().lock(), &mut out)?;
        }
        Command::Catalog { json } => {
            let dump = if json {
                table.to_json()
            } else {
                table.to_yaml()
            };
            write!(out, "{}", dump.context("failed to serialize catalog")?)?;
            if json {
                writeln!(out)?;
            }
        }
    }

    Ok(())
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
        .context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(verbose > 1)
                .compact(),
        )
        .try_init()
        .context("failed to install log subscriber")?;
    Ok(())
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// The built-in catalog, with `path` merged over it when given.
fn load_table(path: Option<&std::path::Path>) -> Result<TokenTable> {
    let table = TokenTable::default();
    let Some(path) = path else {
        return Ok(table);
    };

    let custom = TokenTable::from_file(path)
        .with_context(|| format!("failed to load catalog {}", path.display()))?;
    tracing::info!(path = %path.display(), codes = custom.len(), "merged catalog");
    Ok(table.merge(custom))
}

fn compile(template: &str, table: &TokenTable) -> Result<CompiledFormat> {
    CompiledFormat::compile(template, table)
        .with_context(|| format!("cannot compile format '{template}'"))
}

/// Map the command-line key notation onto keystrokes.
fn keystrokes(keys: &str) -> String {
    keys.chars()
        .map(|c| if c == BACKSPACE_KEY { BACKSPACE } else { c })
        .collect()
}

fn type_keys(format: CompiledFormat, keys: &str, out: &mut impl Write) -> Result<()> {
    let mut input = MaskedInput::new(format, MemoryHost::new());
    for step in input.type_keys(&keystrokes(keys)) {
        writeln!(out, "{step}")?;
    }
    Ok(())
}

fn replay(format: &mut CompiledFormat, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read stdin")?;
        writeln!(out, "{}", format.reformat(&line))?;
    }
    Ok(())
}
