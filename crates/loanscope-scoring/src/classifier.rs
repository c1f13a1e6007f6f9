//! Trait for the pre-trained credit classifier.
//!
//! The dashboard never trains anything: it receives a fitted model at
//! startup and only asks it for probabilities and hard labels. Keeping the
//! model behind a trait lets the bundled logistic model be swapped for any
//! other scorer, and lets tests pin probabilities exactly.

use loanscope_common::entities::{OUTCOME_DEFAULTS, OUTCOME_REPAYS};
use loanscope_common::OutcomeLabel;

/// A fitted binary classifier over rows of the transformed feature view.
pub trait Classifier: Send + Sync {
    /// Probability that the applicant repays (class 0).
    fn predict_proba(&self, row: &[f64]) -> f64;

    /// Hard labels, 0 = repays, 1 = defaults. Ties go to class 0.
    fn predict(&self, rows: &[Vec<f64>]) -> Vec<OutcomeLabel> {
        rows.iter()
            .map(|row| {
                if self.predict_proba(row) >= 0.5 {
                    OUTCOME_REPAYS
                } else {
                    OUTCOME_DEFAULTS
                }
            })
            .collect()
    }
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Classifier returning fixed probabilities for known rows.
pub struct MockClassifier {
    rows: Vec<(Vec<f64>, f64)>,
    default: f64,
}

impl MockClassifier {
    /// Every unknown row gets `default`.
    pub fn new(default: f64) -> Self {
        Self { rows: Vec::new(), default }
    }

    /// Pin the repayment probability of one row.
    pub fn with(mut self, row: Vec<f64>, probability: f64) -> Self {
        self.rows.push((row, probability));
        self
    }
}

impl Classifier for MockClassifier {
    fn predict_proba(&self, row: &[f64]) -> f64 {
        self.rows
            .iter()
            .find(|(r, _)| r.as_slice() == row)
            .map(|(_, p)| *p)
            .unwrap_or(self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_pins_rows_and_labels_follow_half() {
        let clf = MockClassifier::new(0.9)
            .with(vec![1.0], 0.2)
            .with(vec![2.0], 0.5);
        assert_eq!(clf.predict_proba(&[1.0]), 0.2);
        assert_eq!(clf.predict_proba(&[3.0]), 0.9);
        assert_eq!(clf.predict(&[vec![1.0], vec![2.0], vec![3.0]]), vec![1, 0, 0]);
    }
}
