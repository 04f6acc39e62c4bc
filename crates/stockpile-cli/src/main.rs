#![forbid(unsafe_code)]

mod cmd;
mod output;
mod tui;

use clap::{CommandFactory, Parser, Subcommand};
use cmd::StoreContext;
use cmd::adjust::Direction;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use stockpile_core::config::{load_config, resolve_data_dir};
use stockpile_core::error::ErrorCode;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log file written inside the data directory while the TUI owns the screen.
const TUI_LOG_FILE: &str = "stockpile.log";

#[derive(Parser, Debug)]
#[command(
    name = "stock",
    author,
    version,
    about = "stockpile: keep count of what is on the shelf",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the item list (overrides STOCKPILE_DATA_DIR and config).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of the default location.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Open the interactive list (default)",
        after_help = "KEYS:\n    j/k     move            /       filter or name a new item\n    a       add typed name  s       cycle sort\n    + / -   adjust count    d       delete row\n    esc     clear line      q       quit"
    )]
    Tui,

    #[command(
        about = "List items",
        after_help = "EXAMPLES:\n    # List everything in stored order\n    stock list\n\n    # Items containing \"br\", highest inventory first\n    stock list --filter br --sort descending\n\n    # Emit machine-readable output\n    stock list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        about = "Add an item at zero inventory",
        after_help = "EXAMPLES:\n    stock add \"Olive oil\""
    )]
    Add(cmd::add::AddArgs),

    #[command(
        visible_alias = "remove",
        about = "Delete an item",
        after_help = "EXAMPLES:\n    stock rm \"Olive oil\""
    )]
    Rm(cmd::remove::RemoveArgs),

    #[command(
        about = "Increase an item's inventory",
        after_help = "EXAMPLES:\n    stock inc Eggs --by 12"
    )]
    Inc(cmd::adjust::AdjustArgs),

    #[command(
        about = "Decrease an item's inventory (never below zero)",
        after_help = "EXAMPLES:\n    stock dec Eggs"
    )]
    Dec(cmd::adjust::AdjustArgs),

    #[command(
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    stock completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

impl Cli {
    const fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui))
    }
}

fn init_tracing(verbose: bool, log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_env("STOCKPILE_LOG").unwrap_or_else(|_| {
        // `stock` prefixes the binary's target as well as the `stockpile_*` crates.
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "stock=debug,info"
        } else {
            "stock=info,warn"
        })
    });

    let format = env::var("STOCKPILE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    // The TUI owns the terminal, so its logs go to a file (or nowhere).
    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|()| OpenOptions::new().create(true).append(true).open(path));
            match file {
                Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
                Err(_) => (BoxMakeWriter::new(std::io::sink), false),
            }
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(writer))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_ansi(ansi).with_writer(writer))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let output = resolve_output_mode(cli.format, cli.json);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            init_tracing(cli.verbose, None);
            render_error(
                output,
                &CliError::from_code(ErrorCode::ConfigParseError, format!("{err:#}")),
            )?;
            return Err(err);
        }
    };
    let data_dir = resolve_data_dir(&config, cli.data_dir.as_deref());

    let log_file = cli.is_interactive().then(|| data_dir.join(TUI_LOG_FILE));
    init_tracing(cli.verbose, log_file.as_deref());
    tracing::debug!(data_dir = %data_dir.display(), key = %config.storage.key, "resolved storage");

    let ctx = StoreContext { config, data_dir };
    if let Err(err) = ctx.kv().path_for(&ctx.config.storage.key) {
        render_error(
            output,
            &CliError::from_code(ErrorCode::InvalidStorageKey, err.to_string()),
        )?;
        return Err(err.into());
    }
    if !matches!(cli.command, Some(Commands::Completions(_)))
        && let Err(err) = fs::create_dir_all(&ctx.data_dir)
    {
        let msg = format!("{}: {err}", ctx.data_dir.display());
        render_error(
            output,
            &CliError::from_code(ErrorCode::DataDirUnavailable, &msg),
        )?;
        anyhow::bail!("data directory unavailable: {msg}");
    }

    match cli.command {
        None | Some(Commands::Tui) => tui::run_tui(&ctx),
        Some(Commands::List(ref args)) => cmd::list::run_list(args, output, &ctx),
        Some(Commands::Add(ref args)) => cmd::add::run_add(args, output, &ctx),
        Some(Commands::Rm(ref args)) => cmd::remove::run_remove(args, output, &ctx),
        Some(Commands::Inc(ref args)) => {
            cmd::adjust::run_adjust(args, Direction::Increment, output, &ctx)
        }
        Some(Commands::Dec(ref args)) => {
            cmd::adjust::run_adjust(args, Direction::Decrement, output, &ctx)
        }
        Some(Commands::Completions(ref args)) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
