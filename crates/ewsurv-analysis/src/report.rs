//! Report data for the external renderer.
//!
//! [`ReportData::build`] performs every computation the report needs and
//! returns plain data: plot series, LaTeX formula sources, the `dane`
//! statistics block and a flat placeholder map. The renderer only draws and
//! substitutes.
//!
//! # Layout
//!
//! ```text
//! ReportData
//! ├── plots
//! │   ├── hazard_curves      (WYKRES1) line chart of h(x) per distribution
//! │   └── sample_histograms  (WYKRES2) scaled histogram + density per sample
//! ├── formulas               WZOR_PDF, WZOR_CDF, WZOR_KWANTYL, WZOR_HAZARD
//! ├── dane                   sample1..sampleN, theoretical_EW_{label}
//! └── placeholders           MEAN1, Q1_2, MEDIAN_THEO_243, DATA, ...
//! ```
//!
//! Values that are not finite (an infinite hazard, for example) serialize as
//! `null`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ewsurv_model::{ExponentiatedWeibull, SimulationSeed};
use ewsurv_stats::histogram::Histogram;
use serde::Serialize;

use crate::{
    StatsError,
    config::{HazardCurveSpec, ReportConfig, SampleSpec},
    sample_summary::SampleSummary,
    theoretical::TheoreticalQuantiles,
};

/// Number of points on each theoretical density curve.
pub const DENSITY_POINTS: usize = 200;
/// Height of the density curve peak relative to the tallest histogram bar.
pub const DENSITY_PEAK: f64 = 0.8;
/// Left end of the density curve; the density may diverge at zero.
pub const DENSITY_X_MIN: f64 = 0.01;
/// Right end of the density curve as a multiple of the sample maximum.
pub const DENSITY_X_MAX_FACTOR: f64 = 1.1;

/// Format of the `DATA` placeholder.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ReportError {
    #[display("sample{index}: {source}")]
    Sample { index: usize, source: StatsError },
    #[display("sample{index}: histogram needs at least one bin")]
    NoHistogramBins { index: usize },
    #[display("hazard grid needs at least 2 points on a non-empty interval")]
    InvalidHazardGrid,
    #[display("theoretical label {label:?} is used more than once")]
    DuplicateTheoreticalLabel { label: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub generated_at: DateTime<Utc>,
    pub seed: SimulationSeed,
    pub plots: BTreeMap<String, ReportPlot>,
    pub formulas: BTreeMap<String, Formula>,
    pub dane: Dane,
    /// Template placeholder name to substituted text.
    pub placeholders: BTreeMap<String, String>,
}

/// Statistics block keyed the way the report template reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dane {
    /// `sample1`, `sample2`, ...
    #[serde(flatten)]
    pub samples: BTreeMap<String, SampleSummary>,
    /// `theoretical_EW_{label}`
    #[serde(flatten)]
    pub theoretical: BTreeMap<String, TheoreticalQuantiles>,
}

/// A plot and the template placeholder its image replaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPlot {
    pub placeholder: String,
    #[serde(flatten)]
    pub plot: Plot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Plot {
    LineChart(LineChart),
    HistogramGrid(HistogramGrid),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    /// `None` where the function is not finite.
    pub y: Option<f64>,
}

impl Point {
    fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y: y.is_finite().then_some(y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramGrid {
    pub title: String,
    pub panels: Vec<HistogramPanel>,
}

/// Histogram of one sample with the theoretical density overlaid.
///
/// Bar heights are scaled so the tallest bar is 1.0; the density is scaled so
/// its peak is [`DENSITY_PEAK`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramPanel {
    pub title: String,
    pub sample: String,
    pub bars: Vec<Bar>,
    pub density: Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    pub center: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Formula {
    pub title: String,
    pub latex: String,
}

impl ReportData {
    /// Draws every configured sample from one stream seeded by `config.seed`
    /// and assembles the report.
    pub fn build(config: &ReportConfig, generated_at: DateTime<Utc>) -> Result<Self, ReportError> {
        let HazardCurveSpec {
            x_min,
            x_max,
            points,
            ..
        } = config.hazard_curves;
        if points < 2 || x_max.partial_cmp(&x_min) != Some(std::cmp::Ordering::Greater) {
            return Err(ReportError::InvalidHazardGrid);
        }

        let mut rng = config.seed.rng();
        let samples = config
            .samples
            .iter()
            .map(|spec| spec.distribution.generate_sample(spec.size, &mut rng))
            .collect::<Vec<_>>();

        let mut sample_summaries = BTreeMap::new();
        let mut panels = Vec::with_capacity(samples.len());
        let mut placeholders = BTreeMap::new();
        for (index, (spec, values)) in (1..).zip(config.samples.iter().zip(&samples)) {
            let summary =
                SampleSummary::new(values).map_err(|source| ReportError::Sample { index, source })?;
            if spec.histogram_bins == 0 {
                return Err(ReportError::NoHistogramBins { index });
            }
            panels.push(histogram_panel(index, spec, values, summary.max));
            insert_sample_placeholders(&mut placeholders, index, &summary);
            sample_summaries.insert(format!("sample{index}"), summary);
        }

        let mut theoretical = BTreeMap::new();
        for spec in &config.theoretical {
            let key = format!("theoretical_EW_{}", spec.label);
            if theoretical.contains_key(&key) {
                return Err(ReportError::DuplicateTheoreticalLabel {
                    label: spec.label.clone(),
                });
            }
            let quantiles = TheoreticalQuantiles::from_distribution(&spec.distribution);
            insert_theoretical_placeholders(&mut placeholders, &spec.label, &quantiles);
            theoretical.insert(key, quantiles);
        }
        placeholders.insert(
            "DATA".to_owned(),
            generated_at.format(DATE_FORMAT).to_string(),
        );

        let mut plots = BTreeMap::new();
        plots.insert(
            "hazard_curves".to_owned(),
            ReportPlot {
                placeholder: "WYKRES1".to_owned(),
                plot: Plot::LineChart(hazard_chart(&config.hazard_curves)),
            },
        );
        plots.insert(
            "sample_histograms".to_owned(),
            ReportPlot {
                placeholder: "WYKRES2".to_owned(),
                plot: Plot::HistogramGrid(HistogramGrid {
                    title: "Sample histograms and theoretical EW density".to_owned(),
                    panels,
                }),
            },
        );

        Ok(Self {
            generated_at,
            seed: config.seed,
            plots,
            formulas: formulas(),
            dane: Dane {
                samples: sample_summaries,
                theoretical,
            },
            placeholders,
        })
    }
}

/// `points` evenly spaced values from `start` to `end`, both included.
#[expect(clippy::cast_precision_loss)]
pub fn linspace(start: f64, end: f64, points: usize) -> impl Iterator<Item = f64> {
    let step = if points > 1 {
        (end - start) / (points - 1) as f64
    } else {
        0.0
    };
    (0..points).map(move |i| {
        if i + 1 == points && points > 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

fn parameter_label(distribution: &ExponentiatedWeibull) -> String {
    format!(
        "({},{},{})",
        distribution.alpha(),
        distribution.beta(),
        distribution.gamma()
    )
}

fn hazard_chart(spec: &HazardCurveSpec) -> LineChart {
    let series = spec
        .distributions
        .iter()
        .map(|distribution| Series {
            label: parameter_label(distribution),
            points: linspace(spec.x_min, spec.x_max, spec.points)
                .map(|x| Point::new(x, distribution.hazard(x)))
                .collect(),
        })
        .collect();
    LineChart {
        title: "Exponentiated Weibull hazard function".to_owned(),
        x_label: "x".to_owned(),
        y_label: "h(x)".to_owned(),
        series,
    }
}

fn histogram_panel(index: usize, spec: &SampleSpec, values: &[f64], max: f64) -> HistogramPanel {
    let histogram = Histogram::new(values.iter().copied(), spec.histogram_bins);
    let bars = histogram
        .bins
        .iter()
        .zip(histogram.scaled_counts())
        .map(|(bin, height)| Bar {
            center: bin.center(),
            width: bin.width(),
            height,
        })
        .collect();

    let xs =
        linspace(DENSITY_X_MIN, max * DENSITY_X_MAX_FACTOR, DENSITY_POINTS).collect::<Vec<_>>();
    let ys = xs
        .iter()
        .map(|&x| spec.distribution.density(x))
        .collect::<Vec<_>>();
    let peak = ys
        .iter()
        .copied()
        .filter(|y| y.is_finite())
        .fold(0.0, f64::max);
    let scale = if peak > 0.0 { DENSITY_PEAK / peak } else { 0.0 };
    let density = Series {
        label: "Theoretical density".to_owned(),
        points: xs
            .iter()
            .zip(&ys)
            .map(|(&x, &y)| Point::new(x, y * scale))
            .collect(),
    };

    HistogramPanel {
        title: format!(
            "EW(α={}, β={}, γ={}), n={}",
            spec.distribution.alpha(),
            spec.distribution.beta(),
            spec.distribution.gamma(),
            spec.size
        ),
        sample: format!("sample{index}"),
        bars,
        density,
    }
}

fn insert_sample_placeholders(
    placeholders: &mut BTreeMap<String, String>,
    index: usize,
    summary: &SampleSummary,
) {
    let entries = [
        (format!("MEAN{index}"), summary.mean),
        (format!("MEDIAN{index}"), summary.median),
        (format!("STD{index}"), summary.std),
        (format!("Q1_{index}"), summary.q1),
        (format!("Q3_{index}"), summary.q3),
        (format!("IQR{index}"), summary.iqr),
        (format!("MIN{index}"), summary.min),
        (format!("MAX{index}"), summary.max),
        (format!("RANGE{index}"), summary.range),
    ];
    for (key, value) in entries {
        placeholders.insert(key, format!("{value:.4}"));
    }
}

fn insert_theoretical_placeholders(
    placeholders: &mut BTreeMap<String, String>,
    label: &str,
    quantiles: &TheoreticalQuantiles,
) {
    let entries = [
        (format!("MEDIAN_THEO_{label}"), quantiles.median),
        (format!("Q1_THEO_{label}"), quantiles.q1),
        (format!("Q3_THEO_{label}"), quantiles.q3),
        (format!("IQR_THEO_{label}"), quantiles.iqr),
    ];
    for (key, value) in entries {
        placeholders.insert(key, format!("{value:.4}"));
    }
}

fn formulas() -> BTreeMap<String, Formula> {
    let entries = [
        (
            "WZOR_PDF",
            "Probability density function",
            r"f(x) = \gamma \frac{\alpha}{\beta} \left(\frac{x}{\beta}\right)^{\alpha-1} e^{-\left(\frac{x}{\beta}\right)^\alpha} \left(1-e^{-\left(\frac{x}{\beta}\right)^\alpha}\right)^{\gamma-1}, \quad x > 0",
        ),
        (
            "WZOR_CDF",
            "Cumulative distribution function",
            r"F(x) = \left(1 - e^{-\left(\frac{x}{\beta}\right)^\alpha}\right)^\gamma, \quad x > 0",
        ),
        (
            "WZOR_KWANTYL",
            "Quantile function",
            r"Q(p) = \beta \left( - \ln\left(1 - p^{\frac{1}{\gamma}}\right) \right)^{\frac{1}{\alpha}}, \quad 0 \leq p < 1",
        ),
        (
            "WZOR_HAZARD",
            "Hazard function",
            r"h(x) = \frac{f(x)}{1 - F(x)} = \frac{\gamma \frac{\alpha}{\beta} \left(\frac{x}{\beta}\right)^{\alpha-1} e^{-\left(\frac{x}{\beta}\right)^\alpha} \left[1 - e^{-\left(\frac{x}{\beta}\right)^\alpha}\right]^{\gamma-1}}{1 - \left[1 - e^{-\left(\frac{x}{\beta}\right)^\alpha}\right]^\gamma}, \quad x > 0",
        ),
    ];
    entries
        .into_iter()
        .map(|(key, title, latex)| {
            (
                key.to_owned(),
                Formula {
                    title: title.to_owned(),
                    latex: latex.to_owned(),
                },
            )
        })
        .collect()
}
