use clap::{Parser, Subcommand};

use self::{censoring::CensoringArg, evaluate::EvaluateArg, report::ReportArg};

mod censoring;
mod evaluate;
mod report;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Build the report data (plots, formulas, statistics) as JSON
    Report(#[clap(flatten)] ReportArg),
    /// Simulate Type I, Type II and random censoring and summarize each scheme
    Censoring(#[clap(flatten)] CensoringArg),
    /// Evaluate EW distribution functions at given points
    Evaluate(#[clap(flatten)] EvaluateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Censoring(arg) => censoring::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
    }
    Ok(())
}
