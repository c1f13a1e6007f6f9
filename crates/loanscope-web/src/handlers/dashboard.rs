//! Client dashboard: selection, score, explanation, radar and histogram views.
//! Every view renders the same page with one extra panel filled in.

use axum::{
    extract::{Form, State},
    response::Html,
};
use axum_extra::extract::cookie::CookieJar;
use loanscope_common::{ApiError, LoanscopeError};
use loanscope_data::SelectedClient;
use loanscope_scoring::histogram::{HistogramDataset, HistogramFeature};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::handlers::parse_applicant_id;
use crate::session::{ensure_session, existing_session};
use crate::state::{AppState, SharedState};

#[derive(Debug, Deserialize)]
pub struct SelectForm {
    #[serde(rename = "Numéro de dossier")]
    pub numero: String,
}

#[derive(Debug, Deserialize)]
pub struct HistogramForm {
    pub data_value: String,
}

#[derive(Debug, Serialize)]
struct FeatureOption {
    column: &'static str,
    title: &'static str,
}

#[derive(Debug, Serialize)]
struct PredictionView {
    /// e.g. "Prêt : Accordé"
    text: String,
    /// Repayment probability in percent
    pred: f64,
}

#[derive(Debug, Serialize)]
struct DashboardView {
    client_number: i64,
    age: String,
    genre: String,
    histogram_features: Vec<FeatureOption>,
    prediction: Option<PredictionView>,
    exp: Option<String>,
    ok_radar: bool,
    histo: Option<HistogramDataset>,
}

impl DashboardView {
    fn for_client(client: &SelectedClient) -> Self {
        let histogram_features = HistogramFeature::ALL
            .iter()
            .map(|f| FeatureOption { column: f.column(), title: f.title() })
            .collect();

        Self {
            client_number: client.applicant_id,
            age: client.age_label(),
            genre: client.gender.to_string(),
            histogram_features,
            prediction: None,
            exp: None,
            ok_radar: false,
            histo: None,
        }
    }
}

fn render(state: &AppState, view: DashboardView) -> Result<Html<String>, ApiError> {
    Ok(Html(state.templates.render("dashboard.html", view)?))
}

/// The client selected in the caller's session.
pub(crate) async fn selected_client(state: &AppState, jar: &CookieJar) -> Result<SelectedClient, ApiError> {
    let session = existing_session(jar, &state.config.session.cookie_name)
        .ok_or(LoanscopeError::UninitializedState)?;
    Ok(state.store.current(&session).await?)
}

/// POST /dashboard/
pub async fn dashboard_select(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<SelectForm>,
) -> Result<(CookieJar, Html<String>), ApiError> {
    let applicant_id = parse_applicant_id(&form.numero)?;
    let (jar, session) = ensure_session(jar, &state.config.session.cookie_name);
    let client = state
        .store
        .select(&session, state.engine.population(), applicant_id)
        .await?;

    let page = render(&state, DashboardView::for_client(&client))?;
    Ok((jar, page))
}

/// GET|POST /results/
pub async fn results(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Html<String>, ApiError> {
    let client = selected_client(&state, &jar).await?;
    let prediction = state.engine.predict(client.applicant_id)?;
    info!(
        applicant_id = client.applicant_id,
        decision = prediction.label.label(),
        "Score displayed"
    );

    let mut view = DashboardView::for_client(&client);
    view.prediction = Some(PredictionView {
        text: format!("Prêt : {}", prediction.label.label()),
        pred: prediction.percentage(),
    });
    render(&state, view)
}

/// POST /LIME/
pub async fn explanation(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Html<String>, ApiError> {
    let client = selected_client(&state, &jar).await?;
    let mut view = DashboardView::for_client(&client);
    view.exp = Some(state.engine.explain_html(client.applicant_id)?);
    render(&state, view)
}

/// POST /RADAR/; the page itself fetches /API/radar/.
pub async fn radar_page(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Html<String>, ApiError> {
    let client = selected_client(&state, &jar).await?;
    let mut view = DashboardView::for_client(&client);
    view.ok_radar = true;
    render(&state, view)
}

/// POST /HISTO/
pub async fn histogram(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<HistogramForm>,
) -> Result<Html<String>, ApiError> {
    let client = selected_client(&state, &jar).await?;
    let dataset = state.engine.histogram(client.applicant_id, form.data_value.trim())?;

    let mut view = DashboardView::for_client(&client);
    view.histo = Some(dataset);
    render(&state, view)
}
