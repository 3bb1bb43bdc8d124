//! `tsg render` - render the status CSV as a color-coded grid artifact.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;
use tsg_common::{ColorScale, TsgConfig, export, load, render};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Status CSV to render (defaults to the configured stats file)
    #[arg(long, value_name = "PATH")]
    pub stats_file: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Output format (supported: html)
    #[arg(long, default_value = "html")]
    pub format: String,

    /// Color for passed cells (defaults to the configured pass color)
    #[arg(long, value_name = "COLOR")]
    pub pass_color: Option<String>,

    /// Color for failed cells (defaults to the configured fail color)
    #[arg(long, value_name = "COLOR")]
    pub fail_color: Option<String>,
}

pub fn run(args: &RenderArgs, config: &TsgConfig) -> Result<()> {
    let stats_file = args
        .stats_file
        .clone()
        .unwrap_or_else(|| config.general.stats_file.clone());
    let scale = ColorScale::new(
        args.pass_color
            .clone()
            .unwrap_or_else(|| config.colors.pass.clone()),
        args.fail_color
            .clone()
            .unwrap_or_else(|| config.colors.fail.clone()),
    );

    let matrix = load(&stats_file)?;
    let figure = render(&matrix, &scale);
    export(&figure, &args.output, &args.format)?;
    info!(
        stats_file = %stats_file.display(),
        output = %args.output.display(),
        format = %args.format,
        days = matrix.n_days(),
        tests = matrix.n_tests(),
        "rendered status grid"
    );
    println!(
        "Rendered {} days x {} tests -> {}",
        matrix.n_days(),
        matrix.n_tests(),
        args.output.display()
    );
    Ok(())
}
