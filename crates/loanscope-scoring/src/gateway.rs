//! Prediction gateway: probability -> decision label.

use loanscope_common::Decision;
use serde::{Deserialize, Serialize};

/// Probability cut-offs between the three decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// At or above: approved
    pub approve: f64,
    /// At or above (and below `approve`): file to be reviewed
    pub review: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self { approve: 0.55, review: 0.45 }
    }
}

impl DecisionThresholds {
    pub fn decide(&self, probability: f64) -> Decision {
        if probability >= self.approve {
            Decision::Approved
        } else if probability >= self.review {
            Decision::Marginal
        } else {
            Decision::Refused
        }
    }
}

/// Outcome of scoring one applicant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Probability of repayment in [0, 1]
    pub probability: f64,
    pub label: Decision,
}

impl PredictionResult {
    /// Probability as a percentage rounded to two decimals.
    pub fn percentage(&self) -> f64 {
        (self.probability * 100.0 * 100.0).round() / 100.0
    }

    pub fn to_response(&self) -> ScoreResponse {
        ScoreResponse {
            prediction: self.percentage(),
            score: self.label.label().to_string(),
        }
    }
}

/// Body of `GET /API/score/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub prediction: f64,
    pub score: String,
}
