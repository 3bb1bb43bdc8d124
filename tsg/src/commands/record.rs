//! `tsg record` - integrate one day's results into the status CSV.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use tracing::info;
use tsg_common::{TsgConfig, apply_and_persist};

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Status CSV to update (defaults to the configured stats file)
    #[arg(long, value_name = "PATH")]
    pub stats_file: Option<PathBuf>,

    /// Day to record, YYYY-MM-DD (defaults to today)
    #[arg(long, value_name = "DATE")]
    pub day: Option<NaiveDate>,

    /// A test that failed (repeatable); must be covered by --test
    #[arg(long = "failed", value_name = "TEST")]
    pub failed: Vec<String>,

    /// A currently-known test (repeatable); the complete universe for the day
    #[arg(long = "test", value_name = "TEST", required = true)]
    pub tests: Vec<String>,
}

pub fn run(args: &RecordArgs, config: &TsgConfig) -> Result<()> {
    let stats_file = args
        .stats_file
        .clone()
        .unwrap_or_else(|| config.general.stats_file.clone());
    let day = args.day.unwrap_or_else(|| Local::now().date_naive());

    let matrix = apply_and_persist(&stats_file, day, &args.failed, &args.tests)?;
    info!(
        day = %day,
        failed = args.failed.len(),
        known = args.tests.len(),
        days = matrix.n_days(),
        tests = matrix.n_tests(),
        stats_file = %stats_file.display(),
        "recorded day results"
    );
    println!(
        "Recorded {} ({} failed of {} known) -> {} ({} days x {} tests)",
        day,
        args.failed.len(),
        args.tests.len(),
        stats_file.display(),
        matrix.n_days(),
        matrix.n_tests()
    );
    Ok(())
}
