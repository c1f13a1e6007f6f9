//! Axum router — maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{
    api::{api_radar, api_score, health},
    dashboard::{dashboard_select, explanation, histogram, radar_page, results},
    home::home,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",            get(home))
        .route("/dashboard/",  post(dashboard_select))
        .route("/results/",    get(results).post(results))
        .route("/LIME/",       post(explanation))
        .route("/RADAR/",      post(radar_page))
        .route("/HISTO/",      post(histogram))

        // API endpoints
        .route("/API/score/{numero_client}", get(api_score))
        .route("/API/radar/",  get(api_radar))
        .route("/health",      get(health))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
