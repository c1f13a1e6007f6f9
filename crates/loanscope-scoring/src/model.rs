//! Bundled scoring model: median imputation, standard scaling and a
//! logistic regression over the scaled features.
//!
//! The model file is JSON:
//!
//! ```json
//! {
//!   "intercept": -0.1,
//!   "features": [
//!     { "name": "EXT_SOURCE_2", "impute": 0.55, "mean": 0.51, "scale": 0.19, "coef": -1.1 }
//!   ]
//! }
//! ```
//!
//! The linear term is the log-odds of default (class 1).

use std::path::Path;

use loanscope_common::{LoanscopeError, Result};
use loanscope_data::Frame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classifier::Classifier;

/// Preprocessing and weight of one model input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    /// Substitute for undefined cells, in raw units
    pub impute: f64,
    pub mean: f64,
    pub scale: f64,
    pub coef: f64,
}

impl FeatureSpec {
    fn transform(&self, raw: Option<f64>) -> f64 {
        (raw.unwrap_or(self.impute) - self.mean) / self.scale
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub intercept: f64,
    pub features: Vec<FeatureSpec>,
}

impl LogisticModel {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading model from {:?}", path);
        let content = tokio::fs::read_to_string(path).await?;
        let model = Self::from_json(&content)?;
        info!("Loaded logistic model with {} features", model.features.len());
        Ok(model)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let model: LogisticModel = serde_json::from_str(content)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.features.is_empty() {
            return Err(LoanscopeError::Config("model has no features".to_string()));
        }
        for spec in &self.features {
            if !spec.scale.is_finite() || spec.scale == 0.0 {
                return Err(LoanscopeError::Config(format!(
                    "feature {} has invalid scale {}",
                    spec.name, spec.scale
                )));
            }
        }
        let mut names: Vec<&str> = self.features.iter().map(|f| f.name.as_str()).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|w| w[0] == w[1]) {
            return Err(LoanscopeError::Config(format!("feature {} listed twice", pair[0])));
        }
        Ok(())
    }

    /// Model input names, in coefficient order.
    pub fn feature_names(&self) -> Vec<String> {
        self.features.iter().map(|f| f.name.clone()).collect()
    }

    pub fn coefficients(&self) -> Vec<f64> {
        self.features.iter().map(|f| f.coef).collect()
    }

    /// Build the transformed feature view: one column per model input,
    /// imputed and scaled, in coefficient order.
    pub fn transform(&self, population: &Frame) -> Result<Frame> {
        let mut data = Vec::with_capacity(self.features.len());
        for spec in &self.features {
            let column = population.column(&spec.name)?;
            data.push(column.iter().map(|&raw| Some(spec.transform(raw))).collect());
        }
        Frame::from_columns(population.ids().to_vec(), self.feature_names(), data)
    }

    /// Log-odds of default for a transformed row.
    pub fn decision_function(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .features
                .iter()
                .zip(row)
                .map(|(spec, x)| spec.coef * x)
                .sum::<f64>()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticModel {
    fn predict_proba(&self, row: &[f64]) -> f64 {
        1.0 - sigmoid(self.decision_function(row))
    }
}
