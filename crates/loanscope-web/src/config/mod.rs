//! Configuration loading for LoanScope.
//! Reads loanscope.toml from the current directory or the path in LOANSCOPE_CONFIG.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use loanscope_scoring::engine::default_radar_general;
use loanscope_scoring::{DecisionThresholds, EngineSettings};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_bind()       -> SocketAddr { SocketAddr::from(([127, 0, 0, 1], 5000)) }
fn default_static_dir() -> PathBuf    { PathBuf::from("static") }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind(), static_dir: default_static_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_population")]
    pub population: PathBuf,
    #[serde(default = "default_model")]
    pub model: PathBuf,
    /// Persisted client selections
    #[serde(default = "default_records")]
    pub records: PathBuf,
}

fn default_population() -> PathBuf { PathBuf::from("data/population.csv") }
fn default_model()      -> PathBuf { PathBuf::from("data/model.json") }
fn default_records()    -> PathBuf { PathBuf::from("data/results.csv") }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            population: default_population(),
            model: default_model(),
            records: default_records(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_approve_threshold")]
    pub approve_threshold: f64,
    #[serde(default = "default_review_threshold")]
    pub review_threshold: f64,
    #[serde(default = "default_explain_features")]
    pub explain_num_features: usize,
    #[serde(default = "default_radar_top_n")]
    pub radar_top_n: usize,
    #[serde(default = "default_radar_general")]
    pub radar_general: Vec<String>,
}

fn default_approve_threshold() -> f64   { 0.55 }
fn default_review_threshold()  -> f64   { 0.45 }
fn default_explain_features()  -> usize { 20 }
fn default_radar_top_n()       -> usize { 5 }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            approve_threshold: default_approve_threshold(),
            review_threshold: default_review_threshold(),
            explain_num_features: default_explain_features(),
            radar_top_n: default_radar_top_n(),
            radar_general: default_radar_general(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let in_unit = |p: f64| (0.0..=1.0).contains(&p);
        if !in_unit(self.approve_threshold) || !in_unit(self.review_threshold) {
            anyhow::bail!("decision thresholds must lie in [0, 1]");
        }
        if self.review_threshold > self.approve_threshold {
            anyhow::bail!(
                "review_threshold ({}) must not exceed approve_threshold ({})",
                self.review_threshold,
                self.approve_threshold
            );
        }
        if self.radar_top_n > self.explain_num_features {
            anyhow::bail!(
                "radar_top_n ({}) cannot exceed explain_num_features ({})",
                self.radar_top_n,
                self.explain_num_features
            );
        }
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            thresholds: DecisionThresholds {
                approve: self.approve_threshold,
                review: self.review_threshold,
            },
            explain_num_features: self.explain_num_features,
            radar_top_n: self.radar_top_n,
            radar_general: self.radar_general.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_cookie_name() -> String { "loanscope_session".to_string() }

impl Default for SessionConfig {
    fn default() -> Self {
        Self { cookie_name: default_cookie_name() }
    }
}

mod tests;

impl Config {
    /// Load configuration from loanscope.toml.
    /// Checks LOANSCOPE_CONFIG env var first, then current directory.
    /// A missing file yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("LOANSCOPE_CONFIG")
            .unwrap_or_else(|_| "loanscope.toml".to_string());

        if !Path::new(&path).exists() {
            tracing::warn!("Config file not found: {}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.scoring.validate()?;
        Ok(config)
    }
}
