//! Censoring simulation command
//!
//! Draws one lifetime sample per censoring scheme from a single seeded stream
//! (Type I, then Type II, then random) and prints the summary statistics of
//! each. A scheme whose statistics cannot be computed is reported and the
//! remaining schemes still run.

mod table;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use ewsurv_analysis::{
    StatsError,
    censored::{CensoringSummary, RandomSummary, TypeIISummary, TypeISummary},
};
use ewsurv_model::{
    GeneralizedExponential, RandomCensored, SimulationSeed, TypeICensored, TypeIICensored,
    censoring,
};
use serde::Serialize;

use crate::util::Output;

#[derive(Debug, Clone, Args)]
pub(crate) struct CensoringArg {
    /// Number of subjects per scheme
    #[arg(long, default_value_t = 20)]
    n: usize,
    /// Rate λ of the generalized exponential lifetimes
    #[arg(long, default_value_t = 1.5)]
    rate: f64,
    /// Shape α of the generalized exponential lifetimes
    #[arg(long, default_value_t = 2.0)]
    shape: f64,
    /// Type I censoring time
    #[arg(long, default_value_t = 1.5)]
    t0: f64,
    /// Type II number of observed failures
    #[arg(long, default_value_t = 12)]
    m: usize,
    /// Mean of the exponential censoring times for random censoring
    #[arg(long, default_value_t = 1.0)]
    eta: f64,
    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Write datasets and summaries as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CensoringOutput {
    seed: SimulationSeed,
    lifetime: GeneralizedExponential,
    type_i: SchemeOutput<TypeICensored>,
    type_ii: SchemeOutput<TypeIICensored>,
    random: SchemeOutput<RandomCensored>,
}

#[derive(Debug, Serialize)]
struct SchemeOutput<D> {
    data: D,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<CensoringSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<D> SchemeOutput<D> {
    fn new<S>(data: D, summary: Result<S, StatsError>) -> Self
    where
        S: Into<CensoringSummary>,
    {
        match summary {
            Ok(summary) => Self {
                data,
                summary: Some(summary.into()),
                error: None,
            },
            Err(err) => Self {
                data,
                summary: None,
                error: Some(err.to_string()),
            },
        }
    }
}

pub(crate) fn run(arg: &CensoringArg) -> anyhow::Result<()> {
    let lifetime = GeneralizedExponential::new(arg.rate, arg.shape)
        .context("Invalid lifetime parameters")?;
    let seed = SimulationSeed::from(arg.seed);
    let mut rng = seed.rng();

    let type_i = censoring::type_i(&lifetime, arg.n, arg.t0, &mut rng)
        .context("Type I censoring simulation failed")?;
    let type_ii = censoring::type_ii(&lifetime, arg.n, arg.m, &mut rng)
        .context("Type II censoring simulation failed")?;
    let random = censoring::random(&lifetime, arg.n, arg.eta, &mut rng)
        .context("Random censoring simulation failed")?;
    tracing::info!(%seed, n = arg.n, "simulated censored samples");

    let output = CensoringOutput {
        seed,
        lifetime,
        type_i: SchemeOutput::new(type_i.clone(), TypeISummary::from_dataset(&type_i)),
        type_ii: SchemeOutput::new(type_ii.clone(), TypeIISummary::from_dataset(&type_ii)),
        random: SchemeOutput::new(random.clone(), RandomSummary::from_dataset(&random)),
    };

    println!(
        "Censoring Simulation (n={}, λ={}, α={}, seed={})",
        arg.n,
        lifetime.rate(),
        lifetime.shape(),
        arg.seed
    );
    println!("==========================================\n");

    table::print_legend();
    println!();

    let schemes = [
        ("Type I", format!("t0 = {}", arg.t0), &output.type_i.summary, &output.type_i.error),
        ("Type II", format!("m = {}", arg.m), &output.type_ii.summary, &output.type_ii.error),
        ("Random", format!("η = {}", arg.eta), &output.random.summary, &output.random.error),
    ];

    let available = schemes
        .iter()
        .filter_map(|(_, _, summary, _)| summary.as_ref())
        .collect::<Vec<_>>();
    println!("Overview");
    table::print_overview_table(&available);
    println!();

    for (name, parameter, summary, error) in &schemes {
        println!("{name} censoring ({parameter})");
        match (summary, error) {
            (Some(summary), _) => table::print_summary_table(summary),
            (None, Some(error)) => {
                tracing::warn!(scheme = %name, %error, "statistics unavailable");
                println!("  Statistics unavailable: {error}");
            }
            (None, None) => {}
        }
        println!();
    }

    if let Some(path) = &arg.output {
        Output::save_json(&output, Some(path.clone()))?;
        println!("Censoring data saved to: {}", path.display());
    }
    Ok(())
}
