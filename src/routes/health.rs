//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is running.
//! Used by Kubernetes, ECS, systemd, and load balancers to verify the service is alive.

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::CurrentLanguage;
use crate::state::AppState;

/// Body of the health check response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
    service: String,
    version: String,
    language: String,
}

/// Health check handler.
///
/// Reports service identity plus the language this request would render in,
/// which makes the probe double as a quick check of the session cookie.
pub async fn health(
    State(state): State<AppState>,
    Extension(CurrentLanguage(language)): Extension<CurrentLanguage>,
) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: state.config.ui.site_name.clone(),
        version: state.config.ui.version.clone(),
        language: language.code().to_string(),
    })
}
