//! Linear growth model: add the average yearly delta

use super::fit::FitExplanation;
use crate::model::{EstimationMethod, EstimationResult, GrowthStatistics};

/// Years of history needed before the linear fit scores above zero
pub const MIN_LINEAR_YEARS: usize = 2;

/// Next year's statistics as `current + average`; largest files are not projected
pub fn calculate_estimate(current: &GrowthStatistics, average: &GrowthStatistics) -> GrowthStatistics {
    GrowthStatistics {
        year: current.year + 1,
        commits: current.commits + average.commits,
        trees: current.trees + average.trees,
        blobs: current.blobs + average.blobs,
        compressed_bytes: current.compressed_bytes + average.compressed_bytes,
        ..Default::default()
    }
}

/// Apply `calculate_estimate` `years` times, one row per projected year
pub fn project(current: &GrowthStatistics, average: &GrowthStatistics, years: usize) -> Vec<GrowthStatistics> {
    let mut rows = Vec::with_capacity(years);
    let mut last = current.clone();
    for _ in 0..years {
        let next = calculate_estimate(&last, average);
        rows.push(next.clone());
        last = next;
    }
    rows
}

/// Straight line from the first observed commit count, stepping by `average.commits`
pub fn explain_linear_fit(series: &[GrowthStatistics], average: &GrowthStatistics) -> FitExplanation {
    let observed: Vec<f64> = series.iter().map(|s| s.commits as f64).collect();
    if series.len() < MIN_LINEAR_YEARS {
        return FitExplanation::insufficient(EstimationMethod::Linear, observed, MIN_LINEAR_YEARS);
    }

    let start = observed[0];
    let step = average.commits as f64;
    let predicted = (0..observed.len()).map(|i| start + i as f64 * step).collect();
    FitExplanation::score(EstimationMethod::Linear, observed, predicted, MIN_LINEAR_YEARS)
}

pub fn linear_fit_score(series: &[GrowthStatistics], average: &GrowthStatistics) -> f64 {
    explain_linear_fit(series, average).score
}

/// Linear projection scored against the observed commit series
pub fn linear_estimate(
    current: &GrowthStatistics,
    average: &GrowthStatistics,
    series: &[GrowthStatistics],
) -> EstimationResult {
    EstimationResult {
        method: EstimationMethod::Linear,
        statistics: calculate_estimate(current, average),
        fit_score: linear_fit_score(series, average),
        growth_rate: 0.0,
    }
}
