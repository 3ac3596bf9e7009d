//! Router tests driven through `tower::ServiceExt::oneshot`.

mod common;

use std::fs;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use oncopredict_classifiers::config::{CandidateKind, TrainingConfig};
use oncopredict_classifiers::data_handling::FEATURE_NAMES;
use oncopredict_cli::bootstrap::{load_or_train, train_and_persist, AppContext};
use oncopredict_cli::config::AppConfig;
use oncopredict_cli::server::{router, ErrorResponse, PredictResponse};
use tempfile::TempDir;
use tower::ServiceExt;

fn test_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        dataset_path: common::write_dataset(dir.path(), 90),
        models_dir: dir.path().join("models"),
        training: TrainingConfig::default().with_candidates(vec![
            CandidateKind::NaiveBayes,
            CandidateKind::LogisticRegression,
        ]),
        ..AppConfig::default()
    }
}

fn test_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let (predictor, _) = train_and_persist(&config).unwrap();
    (dir, router(Arc::new(AppContext::new(predictor))))
}

async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

fn post_form(body: String) -> Request<Body> {
    Request::post("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn index_renders_every_feature_input() {
    let (_dir, app) = test_app();
    let resp = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(resp).await).unwrap();
    for name in FEATURE_NAMES {
        assert!(html.contains(&format!("name=\"{}\"", name)), "missing input {name}");
    }
}

#[tokio::test]
async fn about_and_health() {
    let (_dir, app) = test_app();
    let resp = app
        .clone()
        .oneshot(Request::get("/about").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(json["status"], "ok");
}

// ---------------------------------------------------------------------------
// Predict
// ---------------------------------------------------------------------------

#[tokio::test]
async fn predict_returns_consistent_json() {
    let (_dir, app) = test_app();
    for malignant in [true, false] {
        let resp = app
            .clone()
            .oneshot(post_form(common::cluster_form(malignant)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: PredictResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();

        let expected = if malignant { "Malignant" } else { "Benign" };
        assert_eq!(body.prediction, expected);
        assert_eq!(
            body.risk_level,
            if malignant { "High Risk" } else { "Low Risk" }
        );
        assert!(body.confidence.malignant.ends_with('%'));
        assert!(body.confidence.benign.ends_with('%'));

        let pm: f64 = body.confidence.malignant.trim_end_matches('%').parse().unwrap();
        let pb: f64 = body.confidence.benign.trim_end_matches('%').parse().unwrap();
        assert!((pm + pb - 100.0).abs() < 0.2);
        assert!(body.confidence_score >= 0.5 && body.confidence_score <= 1.0);
        assert!((body.confidence_score * 100.0 - pm.max(pb)).abs() < 0.06);
    }
}

#[tokio::test]
async fn predict_with_missing_fields_succeeds() {
    let (_dir, app) = test_app();
    let resp = app
        .oneshot(post_form("mean+radius=14.2&worst+area=700".to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: PredictResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(body.prediction == "Benign" || body.prediction == "Malignant");
}

#[tokio::test]
async fn predict_with_non_numeric_value_is_bad_request() {
    let (_dir, app) = test_app();
    let body = common::form_body("1.0").replacen("mean+texture=1.0", "mean+texture=abc", 1);
    let resp = app.oneshot(post_form(body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: ErrorResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(
        err.error,
        "Invalid value for mean texture. Please enter a valid number."
    );
}

#[tokio::test]
async fn predict_without_form_content_type_is_bad_request() {
    let (_dir, app) = test_app();
    let req = Request::post("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: ErrorResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert!(!err.error.is_empty());
}

// ---------------------------------------------------------------------------
// Model info and startup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn model_info_lists_features_in_training_order() {
    let (_dir, app) = test_app();
    let resp = app
        .oneshot(Request::get("/api/model-info").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();

    assert_eq!(json["features_count"], 30);
    let names: Vec<String> = serde_json::from_value(json["feature_names"].clone()).unwrap();
    assert_eq!(names, FEATURE_NAMES.map(String::from).to_vec());
    assert_eq!(json["model_selection"], "Best F1 score on validation set");
    let model_type = json["model_type"].as_str().unwrap();
    assert!(model_type == "Naive Bayes" || model_type == "Logistic Regression");
}

#[test]
fn load_or_train_reuses_saved_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);

    let first = load_or_train(&config).unwrap();
    let model_file = config.models_dir.join("model.json");
    let saved = fs::read_to_string(&model_file).unwrap();

    // The dataset is no longer needed once both artifacts exist.
    fs::remove_file(&config.dataset_path).unwrap();
    let second = load_or_train(&config).unwrap();
    assert_eq!(second.model_info, first.model_info);
    assert_eq!(fs::read_to_string(&model_file).unwrap(), saved);
}

#[test]
fn lone_artifact_triggers_retraining() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    fs::create_dir_all(&config.models_dir).unwrap();
    fs::write(config.models_dir.join("scaler.json"), "stale").unwrap();

    let ctx = load_or_train(&config).unwrap();
    assert_eq!(ctx.model_info.features_count, 30);
    assert!(config.models_dir.join("model.json").is_file());
}

#[test]
fn missing_dataset_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        dataset_path: dir.path().join("absent.csv"),
        models_dir: dir.path().join("models"),
        ..AppConfig::default()
    };
    assert!(load_or_train(&config).is_err());
}
