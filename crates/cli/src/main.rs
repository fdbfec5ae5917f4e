//! ledgercalc CLI — the main entry point.
//!
//! Commands:
//! - `run`      — Interactive raw-mode calculator
//! - `eval`     — Press a scripted sequence of buttons and print the result
//! - `status`   — Show the effective configuration
//! - `onboard`  — Create the config directory and a default config
//! - `doctor`   — Diagnose configuration problems

use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use ledgercalc_config::AppConfig;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "ledgercalc",
    about = "ledgercalc — a calculator backed by on-chain entry functions",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive calculator
    Run,

    /// Evaluate a button script such as "7 + 5 ="
    Eval {
        /// Space-separated button labels
        script: String,

        /// Print the final state as JSON
        #[arg(long)]
        json: bool,

        /// Print every domain event as a JSON line
        #[arg(long)]
        events: bool,
    },

    /// Show the effective configuration
    Status,

    /// Initialize the configuration directory
    Onboard,

    /// Diagnose configuration problems
    Doctor,
}

fn env_filter(verbose: bool) -> EnvFilter {
    let filter = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter))
}

/// Log to stderr.
fn init_stderr_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Log to the configured file; the terminal belongs to the calculator.
fn init_file_tracing(config: &AppConfig, verbose: bool) -> std::io::Result<()> {
    std::fs::create_dir_all(AppConfig::config_dir())?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_ansi(false)
        .with_writer(Mutex::new(file));
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
            init_file_tracing(&config, cli.verbose)?;
            commands::run::run(config).await?
        }
        Commands::Eval {
            script,
            json,
            events,
        } => {
            init_stderr_tracing(cli.verbose);
            commands::eval::run(&script, json, events).await?
        }
        Commands::Status => {
            init_stderr_tracing(cli.verbose);
            commands::status::run().await?
        }
        Commands::Onboard => {
            init_stderr_tracing(cli.verbose);
            commands::onboard::run().await?
        }
        Commands::Doctor => {
            init_stderr_tracing(cli.verbose);
            commands::doctor::run().await?
        }
    }

    Ok(())
}
