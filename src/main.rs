use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use salary_scatter::chart;
use salary_scatter::config::ChartConfig;

/// Render the seniority vs. salary scatterplot of an employee table to SVG.
#[derive(Parser, Debug)]
#[command(name = "salary-scatter", version, about)]
struct Args {
    /// Employee table (.csv, .json or .parquet)
    #[arg(default_value = "data/CompanyData.csv")]
    data: PathBuf,

    /// Where to write the SVG
    #[arg(short, long, default_value = "chart.svg")]
    output: PathBuf,

    /// JSON file overriding the default chart settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ChartConfig::from_json_file(path)
            .with_context(|| format!("loading chart config {}", path.display()))?,
        None => ChartConfig::default(),
    };

    let state = chart::run(&args.data, config).await;
    if state.load_failed() {
        // Already reported by the chart state; leave no output behind.
        return Ok(ExitCode::FAILURE);
    }

    std::fs::write(&args.output, state.document.to_svg())
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!(
        "Wrote {} marks to {}",
        state.dataset.as_ref().map_or(0, |ds| ds.len()),
        args.output.display()
    );
    Ok(ExitCode::SUCCESS)
}
