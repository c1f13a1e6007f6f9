//! Scoring engine: the population, its transformed view and the fitted
//! collaborators, loaded once and shared read-only by every request.

use std::path::Path;
use std::sync::Arc;

use loanscope_common::{OutcomeLabel, Result};
use loanscope_data::Frame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classifier::Classifier;
use crate::explain::{top_contributions, Explainer, FeatureContribution, LinearExplainer};
use crate::gateway::{DecisionThresholds, PredictionResult};
use crate::histogram::{self, HistogramDataset};
use crate::model::LogisticModel;
use crate::radar::{self, RadarPayload};

/// Tunables of the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    pub thresholds: DecisionThresholds,
    /// Features requested from the explainer
    pub explain_num_features: usize,
    /// Length of the applicant-specific radar list
    pub radar_top_n: usize,
    /// Fixed radar list of well-known risk indicators
    pub radar_general: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            thresholds: DecisionThresholds::default(),
            explain_num_features: 20,
            radar_top_n: 5,
            radar_general: default_radar_general(),
        }
    }
}

pub fn default_radar_general() -> Vec<String> {
    ["EXT_SOURCE_2", "EXT_SOURCE_3", "EXT_SOURCE_1", "AMT_ANNUITY", "PAYMENT_RATE"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub struct ScoringEngine {
    population: Frame,
    view: Frame,
    classifier: Arc<dyn Classifier>,
    explainer: Arc<dyn Explainer>,
    /// Hard label of every population row, computed at startup
    predicted: Vec<OutcomeLabel>,
    settings: EngineSettings,
}

impl ScoringEngine {
    /// Wire an engine from its parts and label the whole population.
    pub fn new(
        population: Frame,
        view: Frame,
        classifier: Arc<dyn Classifier>,
        explainer: Arc<dyn Explainer>,
        settings: EngineSettings,
    ) -> Result<Self> {
        let rows = dense_rows(&view)?;
        let predicted = classifier.predict(&rows);

        let repays = predicted.iter().filter(|&&p| p == 0).count();
        info!(
            "Population labelled: {} predicted to repay, {} to default",
            repays,
            predicted.len() - repays
        );

        Ok(Self { population, view, classifier, explainer, predicted, settings })
    }

    /// Load population and model files and build the bundled linear stack.
    pub async fn load(
        population_path: impl AsRef<Path>,
        model_path: impl AsRef<Path>,
        settings: EngineSettings,
    ) -> Result<Self> {
        let population = Frame::load(population_path).await?;
        let model = LogisticModel::load(model_path).await?;
        Self::from_model(population, model, settings)
    }

    pub fn from_model(population: Frame, model: LogisticModel, settings: EngineSettings) -> Result<Self> {
        let view = model.transform(&population)?;
        let explainer = LinearExplainer::from_view(
            model.feature_names(),
            model.coefficients(),
            &dense_rows(&view)?,
        );
        Self::new(population, view, Arc::new(model), Arc::new(explainer), settings)
    }

    pub fn population(&self) -> &Frame {
        &self.population
    }

    pub fn view(&self) -> &Frame {
        &self.view
    }

    pub fn predicted(&self) -> &[OutcomeLabel] {
        &self.predicted
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Score one applicant.
    pub fn predict(&self, applicant_id: i64) -> Result<PredictionResult> {
        let row = self.population.row_of(applicant_id)?;
        let probability = self.classifier.predict_proba(&self.view.dense_row(row)?);
        let label = self.settings.thresholds.decide(probability);
        debug!(applicant_id, probability, ?label, "Prediction");
        Ok(PredictionResult { probability, label })
    }

    /// Top `top_n` features behind one applicant's prediction.
    pub fn explain(&self, applicant_id: i64, top_n: usize) -> Result<Vec<FeatureContribution>> {
        let row = self.population.row_of(applicant_id)?;
        let explanation = self
            .explainer
            .explain_instance(&self.view.dense_row(row)?, self.settings.explain_num_features);
        Ok(top_contributions(&explanation, self.view.columns(), top_n))
    }

    /// The explainer's own visualisation, untouched.
    pub fn explain_html(&self, applicant_id: i64) -> Result<String> {
        let row = self.population.row_of(applicant_id)?;
        let explanation = self
            .explainer
            .explain_instance(&self.view.dense_row(row)?, self.settings.explain_num_features);
        Ok(explanation.html)
    }

    /// Both radar charts for one applicant.
    pub fn radar(&self, applicant_id: i64) -> Result<RadarPayload> {
        let row = self.population.row_of(applicant_id)?;
        let specific: Vec<String> = self
            .explain(applicant_id, self.settings.radar_top_n)?
            .into_iter()
            .map(|c| c.feature)
            .collect();

        radar::build_payload(
            &self.view,
            &self.predicted,
            row,
            &specific,
            &self.settings.radar_general,
        )
    }

    /// Histogram of a raw feature with the applicant's own value.
    pub fn histogram(&self, applicant_id: i64, feature: &str) -> Result<HistogramDataset> {
        let row = self.population.row_of(applicant_id)?;
        histogram::project(&self.population, &self.predicted, row, feature)
    }
}

fn dense_rows(view: &Frame) -> Result<Vec<Vec<f64>>> {
    (0..view.len()).map(|row| view.dense_row(row)).collect()
}
