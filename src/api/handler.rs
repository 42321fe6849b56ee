use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::provision::api_key::extract_api_key;
use crate::provision::outcome::{timestamp, ProvisionFailure, ProvisionResponse};
use crate::provision::provision;
use crate::provision::request::RawProvisionRequest;
use crate::server::AppState;

pub const APP_NAME: &str = "repo-crafter";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub app: &'static str,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        app: APP_NAME,
        timestamp: timestamp(),
    })
}

/// `POST /repositories`. Always answers 200 with the outcome in the body.
pub async fn create_repository(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<ProvisionResponse> {
    let api_key = extract_api_key(&headers);
    let raw = RawProvisionRequest::from_body(&body);

    // Run on its own task so a panic in the workflow still yields a structured response.
    let task = tokio::spawn(async move { provision(&state, api_key.as_deref(), raw).await });

    let outcome = match task.await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "Provisioning task aborted");
            ProvisionFailure::creation_failed(&e.to_string()).into()
        }
    };

    Json(outcome.into())
}
