//! Shared application state for the web server.

use std::sync::Arc;

use anyhow::Context;
use loanscope_data::RecordStore;
use loanscope_scoring::ScoringEngine;
use tracing::info;

use crate::config::Config;
use crate::templates::Templates;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub engine: ScoringEngine,
    /// Selected client per session
    pub store: RecordStore,
    pub templates: Templates,
    pub config: Config,
}

impl AppState {
    /// Load the population, the model and persisted selections.
    pub async fn load(config: Config) -> anyhow::Result<Self> {
        let engine = ScoringEngine::load(
            &config.data.population,
            &config.data.model,
            config.scoring.engine_settings(),
        )
        .await
        .with_context(|| {
            format!(
                "loading population {:?} with model {:?}",
                config.data.population, config.data.model
            )
        })?;

        let store = RecordStore::open(config.data.records.clone(), engine.population())
            .await
            .with_context(|| format!("opening selection file {:?}", config.data.records))?;

        let templates = Templates::new().context("compiling templates")?;

        info!(
            "Loaded {} applicants, {} model features",
            engine.population().len(),
            engine.view().columns().len()
        );

        Ok(Self { engine, store, templates, config })
    }
}

pub type SharedState = Arc<AppState>;
