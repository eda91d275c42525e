use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use ewsurv_analysis::{config::ReportConfig, report::ReportData};
use ewsurv_model::SimulationSeed;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Report configuration JSON file (defaults reproduce the standard report)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the sample draws, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let mut config = match &arg.config {
        Some(path) => util::read_json_file::<ReportConfig, _>("report config", path)?,
        None => ReportConfig::default(),
    };
    if let Some(seed) = arg.seed {
        config.seed = SimulationSeed::from(seed);
    }
    tracing::info!(
        seed = %config.seed,
        samples = config.samples.len(),
        theoretical = config.theoretical.len(),
        "building report data"
    );

    let report = ReportData::build(&config, Utc::now()).context("Failed to build report data")?;
    for (name, summary) in &report.dane.samples {
        tracing::debug!(sample = %name, n = summary.n, mean = summary.mean, "sample summary");
    }

    Output::save_json(&report, arg.output.clone())?;
    if let Some(path) = &arg.output {
        eprintln!("Report data saved to {}", path.display());
    }
    Ok(())
}
