//! loanscope-scoring — Prediction, explanation and the chart aggregations
//! behind the credit dashboard.

pub mod classifier;
pub mod engine;
pub mod explain;
pub mod gateway;
pub mod histogram;
pub mod model;
pub mod normalise;
pub mod radar;

pub use engine::{EngineSettings, ScoringEngine};
pub use gateway::{DecisionThresholds, PredictionResult, ScoreResponse};
