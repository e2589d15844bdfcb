//! Unauthenticated operational endpoints
//!
//! `/health` and `/health/live` answer as long as the process serves HTTP.
//! `/health/ready` also pings the credential store, since no login or token
//! check can succeed without it.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub store: CheckStatus,
}

#[derive(Serialize)]
pub struct CheckStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn respond(status: &'static str, checks: Option<HealthChecks>) -> HealthResponse {
    HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks,
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(respond("healthy", None))
}

/// GET /health/ready: 503 while the user store is unreachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    match state.users().ping().await {
        Ok(()) => Ok(Json(respond(
            "ready",
            Some(HealthChecks {
                store: CheckStatus {
                    status: "healthy",
                    message: None,
                },
            }),
        ))),
        Err(e) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(respond(
                "not_ready",
                Some(HealthChecks {
                    store: CheckStatus {
                        status: "unhealthy",
                        message: Some(e.to_string()),
                    },
                }),
            )),
        )),
    }
}

/// GET /health/live
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(respond("alive", None))
}
