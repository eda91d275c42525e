//! Censoring summary tables
//!
//! Fixed-width tables for the per-scheme statistics printed by the
//! censoring command.

use ewsurv_analysis::censored::{CensoringSummary, RandomSummary, TypeIISummary, TypeISummary};

/// Print the one-line-per-scheme overview table
pub(super) fn print_overview_table(summaries: &[&CensoringSummary]) {
    println!(
        "  {:<10} {:>8} {:>10} {:>10} {:>10}",
        "Scheme", "n", "Complete", "Censored", "Censored%"
    );
    // scheme(10) + n(8) + complete(10) + censored(10) + censored%(10) + spaces(4)
    println!("  {}", "-".repeat(52));
    for summary in summaries {
        println!(
            "  {:<10} {:>8} {:>10} {:>10} {:>9.1}%",
            summary.scheme_name(),
            summary.n(),
            summary.n_complete(),
            summary.n() - summary.n_complete(),
            summary.censoring_rate(),
        );
    }
}

/// Print the statistics of one scheme as a two-column table
pub(super) fn print_summary_table(summary: &CensoringSummary) {
    let rows = match summary {
        CensoringSummary::TypeI(s) => type_i_rows(s),
        CensoringSummary::TypeII(s) => type_ii_rows(s),
        CensoringSummary::Random(s) => random_rows(s),
    };
    println!("  {:<16} {:>12}", "Statistic", "Value");
    println!("  {}", "-".repeat(29));
    for (label, value) in rows {
        println!("  {label:<16} {value:>12}");
    }
}

fn count(value: usize) -> String {
    value.to_string()
}

fn number(value: f64) -> String {
    format!("{value:.4}")
}

fn optional(value: Option<f64>) -> String {
    value.map_or("N/A".to_string(), number)
}

fn type_i_rows(s: &TypeISummary) -> Vec<(&'static str, String)> {
    vec![
        ("n", count(s.n)),
        ("n_complete", count(s.n_complete)),
        ("mean", number(s.mean)),
        ("median", number(s.median)),
        ("std", number(s.std)),
    ]
}

fn type_ii_rows(s: &TypeIISummary) -> Vec<(&'static str, String)> {
    vec![
        ("n", count(s.n)),
        ("n_complete", count(s.n_complete)),
        ("censoring_value", optional(s.censoring_value)),
        ("mean", number(s.mean)),
        ("median", number(s.median)),
        ("std", number(s.std)),
    ]
}

fn random_rows(s: &RandomSummary) -> Vec<(&'static str, String)> {
    vec![
        ("n", count(s.n)),
        ("n_complete", count(s.n_complete)),
        ("n_censored", count(s.n_censored)),
        ("min_time", number(s.min_time)),
        ("max_time", number(s.max_time)),
        ("median_time", number(s.median_time)),
        ("min_complete", optional(s.min_complete)),
        ("max_complete", optional(s.max_complete)),
        ("min_censored", optional(s.min_censored)),
        ("max_censored", optional(s.max_censored)),
    ]
}

/// Print legend explaining the statistics
pub(super) fn print_legend() {
    println!("Legend:");
    println!("  n_complete      : Observations with an exact event time");
    println!("  censoring_value : Time recorded for subjects still alive at the m-th failure");
    println!("  mean/median/std : Computed over complete observations only (std uses n-1)");
    println!("  *_complete      : Extremes of observed events (N/A when there are none)");
    println!("  *_censored      : Extremes of censoring times (N/A when there are none)");
}
