//! HTTP surface of the evaluation service.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const INTERNAL_ERROR: &str = "Error interno del servidor durante la evaluación.";

use crate::engine::InferenceEngine;

/// Response body of `POST /api/evaluate`.
#[derive(Debug, Serialize)]
struct EvaluateResponse {
    success: bool,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    passed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasons: Option<Vec<String>>,
}

async fn health() -> &'static str {
    "ok"
}

/// `application/json` or any `application/*+json` media type.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .is_some_and(|mime| {
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
}

fn internal_error() -> (StatusCode, Json<EvaluateResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(EvaluateResponse {
            success: false,
            message: INTERNAL_ERROR,
            passed: None,
            reasons: None,
        }),
    )
}

/// Any failure to read the body as JSON answers with the 500 envelope.
async fn evaluate(
    State(engine): State<Arc<InferenceEngine>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<EvaluateResponse>) {
    if !is_json(&headers) {
        error!("evaluation request is not declared as JSON");
        return internal_error();
    }
    let document: Value = match serde_json::from_slice(&body) {
        Ok(document) => document,
        Err(e) => {
            error!("evaluation request body is not valid JSON: {e}");
            return internal_error();
        }
    };

    info!(body = %document, "received facts for evaluation");
    let evaluation = engine.evaluate_document(&document);

    (
        StatusCode::OK,
        Json(EvaluateResponse {
            success: true,
            message: "Evaluación completada.",
            passed: Some(evaluation.passed()),
            reasons: Some(evaluation.reasons()),
        }),
    )
}

/// Build the service router around `engine`.
pub fn router(engine: InferenceEngine) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/evaluate", post(evaluate))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(Arc::new(engine))
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, engine: InferenceEngine) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        rules = engine.rules().len(),
        "evaluation service listening"
    );
    axum::serve(listener, router(engine)).await?;
    Ok(())
}
