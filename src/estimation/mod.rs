//! Growth estimation
//!
//! Fits a linear and an exponential model to the cumulative yearly series
//! and projects the next year with whichever explains the commit history
//! better.
//!
//! Selection policy: exponential wins outright when it fits strictly
//! better, and also when it is within [`SELECTION_TOLERANCE`] of the linear
//! fit once at least [`MIN_EXPONENTIAL_YEARS`] years are available. With
//! enough history the exponential model is preferred even when it does not
//! clearly outperform the straight line.

mod exponential;
mod fit;
mod linear;

pub use exponential::{
    MIN_EXPONENTIAL_YEARS, Metric, explain_exponential_fit, exponential_estimate,
    exponential_fit_score, growth_rate,
};
pub use fit::FitExplanation;
pub use linear::{
    MIN_LINEAR_YEARS, calculate_estimate, explain_linear_fit, linear_estimate, linear_fit_score,
    project,
};

use crate::model::{EstimationComparison, EstimationMethod, EstimationResult, GrowthStatistics, YearlySeries};

/// How far below the linear fit the exponential fit may be and still win
pub const SELECTION_TOLERANCE: f64 = 0.1;

/// Inclusive year range used to compute the yearly average
///
/// Covers the complete years after the first one (`first_year + 1` up to
/// `current_year - 1`), clipped to the most recent `max_years`. `None` when
/// the repository is too young to have any.
pub fn estimation_window(first_year: i32, current_year: i32, max_years: u32) -> Option<(i32, i32)> {
    let end = current_year - 1;
    let mut start = first_year + 1;
    if end < start || max_years == 0 {
        return None;
    }
    let max_years = i32::try_from(max_years).unwrap_or(i32::MAX);
    if end - start + 1 > max_years {
        start = end - max_years + 1;
    }
    Some((start, end))
}

/// Mean yearly growth over `start..=end`, using integer division
///
/// The cumulative total at the end of the window minus the total before it,
/// divided by the number of years in the window. Skipped years inside the
/// window still count towards the divisor.
pub fn average_growth(series: &YearlySeries, start: i32, end: i32) -> Option<GrowthStatistics> {
    if end < start {
        return None;
    }
    let years = u64::try_from(end - start + 1).ok()?;
    let endpoint = series.at_or_before(end)?;
    let empty = GrowthStatistics::default();
    let baseline = series.at_or_before(start - 1).unwrap_or(&empty);

    Some(GrowthStatistics {
        commits: endpoint.commits.saturating_sub(baseline.commits) / years,
        trees: endpoint.trees.saturating_sub(baseline.trees) / years,
        blobs: endpoint.blobs.saturating_sub(baseline.blobs) / years,
        compressed_bytes: endpoint.compressed_bytes.saturating_sub(baseline.compressed_bytes) / years,
        ..Default::default()
    })
}

/// Whether the exponential model should be chosen over the linear one
pub fn prefers_exponential(linear_fit: f64, exponential_fit: f64, years: usize) -> bool {
    exponential_fit > linear_fit
        || (exponential_fit >= linear_fit - SELECTION_TOLERANCE && years >= MIN_EXPONENTIAL_YEARS)
}

/// Run both models and keep the selected projection plus both fit scores
pub fn compare_estimation_methods(
    current: &GrowthStatistics,
    average: &GrowthStatistics,
    series: &[GrowthStatistics],
) -> EstimationComparison {
    let linear = linear_estimate(current, average, series);
    let exponential = exponential_estimate(current, series);
    let (linear_fit, exponential_fit) = (linear.fit_score, exponential.fit_score);

    let selected = if prefers_exponential(linear_fit, exponential_fit, series.len()) {
        exponential
    } else {
        linear
    };

    EstimationComparison {
        selected,
        linear_fit,
        exponential_fit,
    }
}

/// Next-year projection from whichever model fits better
pub fn select_best_estimation_method(
    current: &GrowthStatistics,
    average: &GrowthStatistics,
    series: &[GrowthStatistics],
) -> EstimationResult {
    compare_estimation_methods(current, average, series).selected
}

/// Traces of both fit computations, for debug output only
pub fn explain_estimation(average: &GrowthStatistics, series: &[GrowthStatistics]) -> Vec<FitExplanation> {
    vec![
        explain_linear_fit(series, average),
        explain_exponential_fit(series),
    ]
}

/// Emit the fit traces and the final choice at debug level
pub fn log_explanation(average: &GrowthStatistics, series: &[GrowthStatistics], selected: EstimationMethod) {
    for explanation in explain_estimation(average, series) {
        for line in explanation.to_string().lines() {
            tracing::debug!(target: "estimation", "{}", line);
        }
    }
    tracing::debug!(target: "estimation", "selected {} model over {} years", selected, series.len());
}
