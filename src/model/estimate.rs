use serde::Serialize;
use std::fmt;

use super::GrowthStatistics;

/// Growth model used to produce a projection
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimationMethod {
    Linear,
    Exponential,
}

impl fmt::Display for EstimationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimationMethod::Linear => f.write_str("linear"),
            EstimationMethod::Exponential => f.write_str("exponential"),
        }
    }
}

/// A next-year projection together with how well its model explains history
#[derive(Debug, Clone, Serialize)]
pub struct EstimationResult {
    pub method: EstimationMethod,
    pub statistics: GrowthStatistics,
    /// Coefficient of determination of the commit series, in [0, 1]
    pub fit_score: f64,
    /// Mean of the per-metric growth rates (exponential model only, else 0)
    pub growth_rate: f64,
}

/// Selected projection plus both raw fit scores, for side-by-side reporting
#[derive(Debug, Clone, Serialize)]
pub struct EstimationComparison {
    pub selected: EstimationResult,
    pub linear_fit: f64,
    pub exponential_fit: f64,
}
