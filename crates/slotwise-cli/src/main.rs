mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{campaigns, Context};
use crate::error::{exit_code_for, report_error};
use crate::util::resolve_now;
use slotwise_config as config;

#[derive(Debug, Parser)]
#[command(name = "slotwise", version, about = "slotwise CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Reference time instead of the current clock (YYYY-MM-DD[ HH:MM], local)
    #[arg(long, global = true, value_name = "DATETIME")]
    now: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List campaigns with their next scheduled activation
    List(campaigns::ListArgs),
    /// Print the next scheduled activation of one campaign
    Next(campaigns::NextArgs),
    /// Show a campaign with its weekly schedule
    Show(campaigns::ShowArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        now,
        command,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let now_utc = resolve_now(now.as_deref()).with_context(|| "resolve --now")?;
    debug!(now_utc, bound = ?app_config.end_date_bound, "reference time resolved");

    let ctx = Context {
        json,
        config: &app_config,
        now_utc,
    };

    match command {
        Command::List(args) => campaigns::list_campaigns(&ctx, args),
        Command::Next(args) => campaigns::next_activation(&ctx, args),
        Command::Show(args) => campaigns::show_campaign(&ctx, args),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
