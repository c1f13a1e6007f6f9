//! JSON endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use loanscope_common::ApiError;
use loanscope_scoring::radar::RadarPayload;
use loanscope_scoring::ScoreResponse;
use serde_json::{json, Value};

use crate::handlers::dashboard::selected_client;
use crate::handlers::parse_applicant_id;
use crate::state::SharedState;

/// GET /API/score/{numero_client}
pub async fn api_score(
    State(state): State<SharedState>,
    Path(numero_client): Path<String>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let applicant_id = parse_applicant_id(&numero_client)?;
    let prediction = state.engine.predict(applicant_id)?;
    Ok(Json(prediction.to_response()))
}

/// GET /API/radar/ for the session's selected client.
pub async fn api_radar(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Json<RadarPayload>, ApiError> {
    let client = selected_client(&state, &jar).await?;
    Ok(Json(state.engine.radar(client.applicant_id)?))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}
