//! Home page: pick a client file.

use axum::{extract::State, response::Html};
use loanscope_common::ApiError;
use minijinja::context;

use crate::state::SharedState;

pub async fn home(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let clients = state.engine.population().ids_descending();
    let html = state.templates.render("index.html", context! { clients })?;
    Ok(Html(html))
}
