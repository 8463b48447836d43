//! Liveness, readiness and metrics endpoints
//!
//! Stateless apart from the Prometheus recorder in `ProcessMetrics`.

mod metrics;

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::AppState;

pub use self::metrics::{MemoryUsage, ProcessMetrics};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    /// Seconds since the process started
    pub uptime: f64,
    pub environment: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub timestamp: String,
    pub checks: BTreeMap<String, String>,
}

/// Fixed sub-checks reported by the readiness probe
pub const READINESS_CHECKS: [(&str, &str); 2] =
    [("database", "connected"), ("services", "available")];

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: now(),
        uptime: state.metrics.uptime().as_secs_f64(),
        environment: state.config.environment.clone(),
        version: state.config.version.clone(),
    })
}

pub async fn ready_handler() -> Json<ReadyResponse> {
    Json(ReadyResponse {
        status: "ready".to_string(),
        timestamp: now(),
        checks: READINESS_CHECKS
            .iter()
            .map(|(name, result)| (name.to_string(), result.to_string()))
            .collect(),
    })
}

pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.metrics.render(MemoryUsage::current());
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
}
