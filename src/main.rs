// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Mutex;

mod cli;

#[derive(Parser)]
#[command(name = "touchcam")]
#[command(about = "Point-and-shoot camera for small touch displays")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    /// JSON configuration file (missing fields keep their defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Icon directory, overriding the configured one
    #[arg(short, long, global = true)]
    icons: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Take one picture with the saved settings and print its path
    Capture,

    /// Print the effective settings record
    Settings,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG to control the level, e.g. RUST_LOG=touchcam=debug
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true);

    // The terminal UI owns stdout
    match &cli.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            subscriber
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => subscriber.with_writer(std::io::stderr).init(),
    }

    let config = cli::load_config(cli.config.as_deref(), cli.icons)?;

    match cli.command {
        None => cli::run_ui(config),
        Some(Commands::Capture) => cli::capture_once(config),
        Some(Commands::Settings) => cli::print_settings(&config),
    }
}
