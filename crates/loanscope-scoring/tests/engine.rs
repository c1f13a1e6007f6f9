//! Engine-level behaviour over the shared fixtures.

use std::sync::Arc;

use loanscope_common::{Decision, LoanscopeError};
use loanscope_data::Frame;
use loanscope_scoring::classifier::MockClassifier;
use loanscope_scoring::explain::LinearExplainer;
use loanscope_scoring::radar::APPLICANT_GROUP;
use loanscope_scoring::{EngineSettings, ScoreResponse, ScoringEngine};
use loanscope_test_utils::{fixture, REFERENCE_APPLICANT};
use pretty_assertions::assert_eq;

/// Three applicants whose repayment probabilities are pinned to 0.60, 0.50, 0.30.
fn pinned_engine() -> ScoringEngine {
    let ids = vec![100001, 100002, 100003];
    let population = Frame::from_columns(
        ids.clone(),
        vec!["DAYS_BIRTH".into(), "CODE_GENDER".into()],
        vec![
            vec![Some(-14600.0), Some(-9000.0), Some(-20000.0)],
            vec![Some(0.0), Some(1.0), Some(0.0)],
        ],
    )
    .unwrap();
    let view = Frame::from_columns(
        ids,
        vec!["K".into()],
        vec![vec![Some(1.0), Some(2.0), Some(3.0)]],
    )
    .unwrap();

    let classifier = MockClassifier::new(0.0)
        .with(vec![1.0], 0.60)
        .with(vec![2.0], 0.50)
        .with(vec![3.0], 0.30);
    let explainer = LinearExplainer::new(vec!["K".into()], vec![1.0], vec![2.0]);

    ScoringEngine::new(
        population,
        view,
        Arc::new(classifier),
        Arc::new(explainer),
        EngineSettings::default(),
    )
    .unwrap()
}

async fn fixture_engine() -> ScoringEngine {
    let fx = fixture();
    ScoringEngine::load(&fx.population, &fx.model, EngineSettings::default())
        .await
        .unwrap()
}

#[test]
fn test_score_responses_for_pinned_probabilities() {
    let engine = pinned_engine();

    assert_eq!(
        engine.predict(100001).unwrap().to_response(),
        ScoreResponse { prediction: 60.0, score: "Accordé".to_string() }
    );
    assert_eq!(
        engine.predict(100002).unwrap().to_response().score,
        "Défavorable - Dossier à revalider"
    );
    assert_eq!(engine.predict(100003).unwrap().label, Decision::Refused);
    assert_eq!(engine.predicted(), &[0, 0, 1]);
}

#[test]
fn test_unknown_applicant_is_not_found() {
    let engine = pinned_engine();
    assert!(matches!(engine.predict(1), Err(LoanscopeError::NotFound(1))));
    assert!(matches!(engine.radar(1), Err(LoanscopeError::NotFound(1))));
    assert!(matches!(engine.histogram(1, "DAYS_BIRTH"), Err(LoanscopeError::NotFound(1))));
}

#[tokio::test]
async fn test_prediction_is_deterministic() {
    let engine = fixture_engine().await;
    for &id in engine.population().ids() {
        let first = engine.predict(id).unwrap();
        let second = engine.predict(id).unwrap();
        assert_eq!(first, second);
        assert!((0.0..=1.0).contains(&first.probability));
    }
}

#[tokio::test]
async fn test_explain_returns_top_n_by_magnitude() {
    let engine = fixture_engine().await;
    let top = engine.explain(REFERENCE_APPLICANT, 5).unwrap();
    assert_eq!(top.len(), 5);
    assert!(top.windows(2).all(|w| w[0].weight.abs() >= w[1].weight.abs()));
    for c in &top {
        assert!(engine.view().has_column(&c.feature));
    }

    let html = engine.explain_html(REFERENCE_APPLICANT).unwrap();
    assert!(html.starts_with("<table"));
}

#[tokio::test]
async fn test_radar_payload_over_fixture() {
    let engine = fixture_engine().await;
    let payload = engine.radar(REFERENCE_APPLICANT).unwrap();

    assert_eq!(payload.name_1.len(), 5);
    assert_eq!(payload.name_2, engine.settings().radar_general);
    assert_eq!(payload.groups.last(), Some(&APPLICANT_GROUP));
    assert_eq!(payload.data_1.len(), payload.groups.len());

    for values in payload.data_1.values().chain(payload.data_2.values()) {
        for v in values.iter().flatten() {
            assert!((0.0..=100.0).contains(v), "value {} outside radar axis", v);
        }
    }
}

#[tokio::test]
async fn test_histogram_over_fixture() {
    let engine = fixture_engine().await;

    let age = engine.histogram(REFERENCE_APPLICANT, "DAYS_BIRTH").unwrap();
    assert_eq!(age.client_value, 40);
    assert_eq!(age.info_client, "40 ans");
    assert_eq!(age.approved.len() + age.refused.len(), engine.population().len());

    // the reference applicant has no EXT_SOURCE_3
    let score = engine.histogram(REFERENCE_APPLICANT, "EXT_SOURCE_3").unwrap();
    assert_eq!(score.client_value, 0);
    assert_eq!(score.title, "Score 3- Valeur client non définie");
    assert_eq!(score.approved.len() + score.refused.len(), engine.population().len() - 1);
    assert!(score.approved.iter().chain(&score.refused).all(|v| !v.is_nan()));
}
