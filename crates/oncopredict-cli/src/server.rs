//! HTTP surface: form page, prediction endpoint, about page and model info.
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use oncopredict_classifiers::error::ClassifierError;
use oncopredict_classifiers::predictor::PredictionResult;

use crate::bootstrap::{AppContext, ModelInfo};
use crate::pages;

const PREDICTION_FAILED: &str =
    "An error occurred during prediction. Please check your input values and try again.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceStrings {
    pub malignant: String,
    pub benign: String,
}

/// Body of a successful `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub confidence: ConfidenceStrings,
    pub risk_level: String,
    pub confidence_score: f64,
}

impl From<&PredictionResult> for PredictResponse {
    fn from(result: &PredictionResult) -> Self {
        PredictResponse {
            prediction: result.label.to_string(),
            confidence: ConfidenceStrings {
                malignant: format!("{:.1}%", result.probability_malignant * 100.0),
                benign: format!("{:.1}%", result.probability_benign * 100.0),
            },
            risk_level: result.label.risk_level().to_string(),
            confidence_score: result.confidence_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build a JSON error response.
fn api_error(status: StatusCode, message: &str) -> Response {
    let body = ErrorResponse {
        error: message.to_string(),
    };
    (status, Json(body)).into_response()
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .route("/about", get(about))
        .route("/api/model-info", get(model_info))
        .route("/health", get(health))
        .with_state(ctx)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index(State(ctx): State<Arc<AppContext>>) -> Html<String> {
    Html(pages::index_page(ctx.predictor.feature_names(), ctx.predictor.model_type()).into_string())
}

async fn about() -> Html<String> {
    Html(pages::about_page().into_string())
}

async fn model_info(State(ctx): State<Arc<AppContext>>) -> Json<ModelInfo> {
    Json(ctx.model_info.clone())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /predict`: form-encoded feature values to a JSON prediction.
async fn predict(
    State(ctx): State<Arc<AppContext>>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let Form(fields) = match form {
        Ok(form) => form,
        Err(rejection) => {
            log::warn!("Rejected prediction request: {}", rejection);
            return api_error(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    match ctx
        .predictor
        .predict_form(|name| fields.get(name).map(String::as_str))
    {
        Ok((result, missing)) => {
            if !missing.is_empty() {
                log::warn!(
                    "Prediction with {} missing fields defaulted to 0.0: {}",
                    missing.len(),
                    missing.join(", ")
                );
            }
            log::debug!(
                "Predicted {} (malignant probability {:.3})",
                result.label,
                result.probability_malignant
            );
            Json(PredictResponse::from(&result)).into_response()
        }
        Err(ClassifierError::InvalidInput { feature, value }) => {
            log::warn!("Invalid value {:?} for {}", value, feature);
            api_error(
                StatusCode::BAD_REQUEST,
                &format!("Invalid value for {}. Please enter a valid number.", feature),
            )
        }
        Err(e) => {
            if e.is_client_error() {
                log::warn!("Prediction rejected: {}", e);
            } else {
                log::error!("Prediction failed: {}", e);
            }
            api_error(StatusCode::INTERNAL_SERVER_ERROR, PREDICTION_FAILED)
        }
    }
}

/// Bind `address` and serve until the process is stopped.
pub async fn serve(ctx: Arc<AppContext>, address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(ctx))
        .await
        .context("HTTP server terminated")?;
    Ok(())
}
