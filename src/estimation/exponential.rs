//! Exponential growth model: compound the mean year-over-year growth rate

use super::fit::FitExplanation;
use crate::model::{EstimationMethod, EstimationResult, GrowthStatistics};

/// Years of history needed before the exponential fit scores above zero
pub const MIN_EXPONENTIAL_YEARS: usize = 3;

/// A cumulative counter the models operate on
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Metric {
    Commits,
    Trees,
    Blobs,
    CompressedBytes,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Commits,
        Metric::Trees,
        Metric::Blobs,
        Metric::CompressedBytes,
    ];

    pub fn value(self, stats: &GrowthStatistics) -> f64 {
        match self {
            Metric::Commits => stats.commits as f64,
            Metric::Trees => stats.trees as f64,
            Metric::Blobs => stats.blobs as f64,
            Metric::CompressedBytes => stats.compressed_bytes as f64,
        }
    }
}

/// Mean of `(current - previous) / previous` over consecutive pairs with a
/// nonzero previous value; 0 when there is no such pair
pub fn growth_rate(series: &[GrowthStatistics], metric: Metric) -> f64 {
    let rates: Vec<f64> = series
        .windows(2)
        .filter_map(|pair| {
            let previous = metric.value(&pair[0]);
            let current = metric.value(&pair[1]);
            (previous > 0.0).then(|| (current - previous) / previous)
        })
        .collect();

    if rates.is_empty() {
        0.0
    } else {
        rates.iter().sum::<f64>() / rates.len() as f64
    }
}

fn grow(value: u64, rate: f64) -> u64 {
    // `as` saturates, so a shrinking rate bottoms out at zero
    (value as f64 * (1.0 + rate)) as u64
}

/// Commit-series fit where each point i > 0 is rebuilt from the first
/// observation using the rate estimated over the prefix ending at i
pub fn explain_exponential_fit(series: &[GrowthStatistics]) -> FitExplanation {
    let observed: Vec<f64> = series.iter().map(|s| s.commits as f64).collect();
    if series.len() < MIN_EXPONENTIAL_YEARS {
        return FitExplanation::insufficient(
            EstimationMethod::Exponential,
            observed,
            MIN_EXPONENTIAL_YEARS,
        );
    }

    let start = observed[0];
    let predicted = (0..series.len())
        .map(|i| {
            if i == 0 {
                return observed[0];
            }
            let rate = growth_rate(&series[..=i], Metric::Commits);
            start * (1.0 + rate).powi(i as i32)
        })
        .collect();

    FitExplanation::score(
        EstimationMethod::Exponential,
        observed,
        predicted,
        MIN_EXPONENTIAL_YEARS,
    )
}

pub fn exponential_fit_score(series: &[GrowthStatistics]) -> f64 {
    explain_exponential_fit(series).score
}

/// Exponential projection of every metric.
///
/// With fewer than two years the current values are carried forward unchanged.
pub fn exponential_estimate(current: &GrowthStatistics, series: &[GrowthStatistics]) -> EstimationResult {
    if series.len() < 2 {
        return EstimationResult {
            method: EstimationMethod::Exponential,
            statistics: GrowthStatistics {
                year: current.year + 1,
                commits: current.commits,
                trees: current.trees,
                blobs: current.blobs,
                compressed_bytes: current.compressed_bytes,
                ..Default::default()
            },
            fit_score: 0.0,
            growth_rate: 0.0,
        };
    }

    let [commits, trees, blobs, bytes] = Metric::ALL.map(|m| growth_rate(series, m));

    EstimationResult {
        method: EstimationMethod::Exponential,
        statistics: GrowthStatistics {
            year: current.year + 1,
            commits: grow(current.commits, commits),
            trees: grow(current.trees, trees),
            blobs: grow(current.blobs, blobs),
            compressed_bytes: grow(current.compressed_bytes, bytes),
            ..Default::default()
        },
        fit_score: exponential_fit_score(series),
        growth_rate: (commits + trees + blobs + bytes) / 4.0,
    }
}
