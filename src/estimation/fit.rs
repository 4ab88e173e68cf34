//! Coefficient of determination and its human-readable trace

use serde::Serialize;
use std::fmt;

use crate::model::EstimationMethod;

/// Arithmetic behind one model's fit score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitExplanation {
    pub method: EstimationMethod,
    pub observed: Vec<f64>,
    /// Empty when there was not enough history to score the model
    pub predicted: Vec<f64>,
    pub mean: f64,
    pub ss_res: f64,
    pub ss_tot: f64,
    pub score: f64,
    /// Years of history the model needs before it scores above zero
    pub required: usize,
}

impl FitExplanation {
    /// Score `predicted` against `observed` as R² = 1 - SSres/SStot.
    ///
    /// A constant observed series scores 1.0; negative R² is floored to 0.
    pub fn score(
        method: EstimationMethod,
        observed: Vec<f64>,
        predicted: Vec<f64>,
        required: usize,
    ) -> Self {
        let mean = mean(&observed);
        let ss_res: f64 = observed
            .iter()
            .zip(&predicted)
            .map(|(o, p)| (o - p) * (o - p))
            .sum();
        let ss_tot: f64 = observed.iter().map(|o| (o - mean) * (o - mean)).sum();

        let score = if ss_tot == 0.0 {
            1.0
        } else {
            (1.0 - ss_res / ss_tot).max(0.0)
        };

        Self {
            method,
            observed,
            predicted,
            mean,
            ss_res,
            ss_tot,
            score,
            required,
        }
    }

    /// Zero-score explanation for a series shorter than `required`
    pub fn insufficient(method: EstimationMethod, observed: Vec<f64>, required: usize) -> Self {
        Self {
            method,
            mean: mean(&observed),
            observed,
            predicted: Vec::new(),
            ss_res: 0.0,
            ss_tot: 0.0,
            score: 0.0,
            required,
        }
    }

    pub fn is_sufficient(&self) -> bool {
        self.observed.len() >= self.required
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn fmt_series(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{:.2}", v)).collect();
    format!("[{}]", parts.join(", "))
}

impl fmt::Display for FitExplanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_sufficient() {
            return write!(
                f,
                "{} fit: needs at least {} years, have {} (score 0.0)",
                self.method,
                self.required,
                self.observed.len()
            );
        }
        writeln!(f, "{} fit: n={} mean={:.2}", self.method, self.observed.len(), self.mean)?;
        writeln!(f, "  observed:  {}", fmt_series(&self.observed))?;
        writeln!(f, "  predicted: {}", fmt_series(&self.predicted))?;
        write!(
            f,
            "  ss_res={:.2} ss_tot={:.2} r2={:.4}",
            self.ss_res, self.ss_tot, self.score
        )
    }
}
