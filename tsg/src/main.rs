//! Test Status Grid - CLI.
//!
//! Records one day's pass/fail results into the persisted status CSV and
//! renders the accumulated history as a color-coded grid.

#![forbid(unsafe_code)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use tsg_common::TsgConfig;

use commands::{record, render};

#[derive(Parser)]
#[command(name = "tsg")]
#[command(
    author,
    version,
    about = "Test Status Grid - record daily test results and render the status heatmap"
)]
struct Cli {
    /// Path to config file (defaults to <config dir>/tsg/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record one day's results into the status CSV
    Record(record::RecordArgs),
    /// Render the status CSV as a color-coded grid
    Render(render::RenderArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TsgConfig::load(cli.config.as_deref())?;

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&config.general.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match &cli.command {
        Command::Record(args) => record::run(args, &config),
        Command::Render(args) => render::run(args, &config),
    }
}
