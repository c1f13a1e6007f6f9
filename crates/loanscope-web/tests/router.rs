//! End-to-end requests against the router over the shared fixtures.

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use loanscope_test_utils::{fixture, Fixture, REFERENCE_APPLICANT};
use loanscope_web::config::Config;
use loanscope_web::router::build_router;
use loanscope_web::state::AppState;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

const FORM: &str = "application/x-www-form-urlencoded";

async fn app() -> (Fixture, Router) {
    let fx = fixture();
    let mut config = Config::default();
    config.data.population = fx.population.clone();
    config.data.model = fx.model.clone();
    config.data.records = fx.records.clone();

    let state = AppState::load(config).await.unwrap();
    (fx, build_router(state))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut req = Request::post(uri).header(header::CONTENT_TYPE, FORM);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::from(body.to_string())).unwrap()
}

/// Select the reference applicant and return the session cookie.
async fn select_reference(app: &Router) -> String {
    let body = format!("Num%C3%A9ro+de+dossier={}", REFERENCE_APPLICANT);
    let (status, headers, html) = send(app, post_form("/dashboard/", None, &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("40 ans"));
    assert!(html.contains("Homme"));

    let set_cookie = headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(set_cookie.starts_with("loanscope_session="));
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let (_fx, app) = app().await;
    let (status, _, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_home_lists_clients_descending() {
    let (_fx, app) = app().await;
    let (status, _, html) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.find("100010").unwrap() < html.find("100001").unwrap());
}

#[tokio::test]
async fn test_score_endpoint() {
    let (_fx, app) = app().await;

    let (status, _, body) = send(&app, get("/API/score/100001")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    let prediction = json["prediction"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&prediction));
    let score = json["score"].as_str().unwrap();
    assert!(["Accordé", "Défavorable - Dossier à revalider", "Refusé"].contains(&score));

    let (status, _, body) = send(&app, get("/API/score/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("error"));

    let (status, _, _) = send(&app, get("/API/score/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_views_require_a_selection() {
    let (_fx, app) = app().await;
    let (status, _, body) = send(&app, get("/API/radar/")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("No client selected"));

    let (status, _, _) = send(&app, post_form("/results/", None, "")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_client_selection_is_not_found() {
    let (_fx, app) = app().await;
    let (status, _, _) =
        send(&app, post_form("/dashboard/", None, "Num%C3%A9ro+de+dossier=42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_flow_for_selected_client() {
    let (fx, app) = app().await;
    let cookie = select_reference(&app).await;
    assert!(fx.records.exists());

    let (status, _, html) = send(&app, post_form("/results/", Some(&cookie), "")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Prêt : "));

    let (status, _, html) = send(&app, post_form("/LIME/", Some(&cookie), "")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<table class="explanation">"#));

    let (status, _, html) = send(&app, post_form("/RADAR/", Some(&cookie), "")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("/API/radar/"));

    let req = Request::get("/API/radar/")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["groups"].as_array().unwrap().last(), Some(&Value::from(3)));

    let (status, _, html) =
        send(&app, post_form("/HISTO/", Some(&cookie), "data_value=DAYS_BIRTH")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Age"));
    assert!(html.contains("40 ans"));

    let (status, _, _) =
        send(&app, post_form("/HISTO/", Some(&cookie), "data_value=NOT_A_COLUMN")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sessions_do_not_share_selection() {
    let (_fx, app) = app().await;
    let _cookie = select_reference(&app).await;

    let req = Request::get("/API/radar/")
        .header(header::COOKIE, "loanscope_session=someone-else")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
