//! Liveness and readiness probes.
//!
//! `/health` answers whenever the process is serving; `/ready` and
//! `/health/components` inspect the configuration and the storage engine,
//! reporting per-component detail with store row counts.

use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Health of a component or of the system as a whole. Ordered from best to
/// worst so combining is a `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn status_code(self) -> StatusCode {
        match self {
            // Degraded still serves traffic.
            HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// The worse of the two statuses.
    pub fn combine(self, other: Self) -> Self {
        self.max(other)
    }
}

/// One component's check result.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub component: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ComponentHealth {
    fn passing(component: &str, details: serde_json::Value) -> Self {
        Self {
            component: component.to_string(),
            status: HealthStatus::Healthy,
            error: None,
            timestamp: Utc::now().timestamp(),
            details: Some(details),
        }
    }

    fn failing(component: &str, error: impl Into<String>) -> Self {
        Self {
            component: component.to_string(),
            status: HealthStatus::Unhealthy,
            error: Some(error.into()),
            timestamp: Utc::now().timestamp(),
            details: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: i64,
    pub version: String,
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        (self.status.status_code(), Json(self)).into_response()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub status: HealthStatus,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub not_ready: Vec<String>,
}

impl IntoResponse for ReadinessResponse {
    fn into_response(self) -> Response {
        let status = if self.ready {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealthResponse {
    pub status: HealthStatus,
    pub timestamp: i64,
    pub components: HashMap<String, ComponentHealth>,
}

impl IntoResponse for ComponentHealthResponse {
    fn into_response(self) -> Response {
        (self.status.status_code(), Json(self)).into_response()
    }
}

/// Runs the per-component checks against the shared application state.
#[derive(Clone)]
pub struct HealthChecker {
    state: Arc<AppState>,
}

impl HealthChecker {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// The storage engine reports its row counts; it is unhealthy only when
    /// its statistics cannot be serialized.
    fn check_store(&self) -> ComponentHealth {
        let stats = self.state.store().stats();
        match serde_json::to_value(&stats) {
            Ok(details) => ComponentHealth::passing("store", details),
            Err(e) => ComponentHealth::failing("store", e.to_string()),
        }
    }

    fn check_config(&self) -> ComponentHealth {
        let config = self.state.config();
        ComponentHealth::passing(
            "config",
            serde_json::json!({
                "httpBind": config.http_bind_address.to_string(),
                "seedDemoData": config.seed_demo_data,
            }),
        )
    }

    pub fn components(&self) -> HashMap<String, ComponentHealth> {
        [self.check_store(), self.check_config()]
            .into_iter()
            .map(|check| (check.component.clone(), check))
            .collect()
    }
}

fn overall(components: &HashMap<String, ComponentHealth>) -> HealthStatus {
    components
        .values()
        .fold(HealthStatus::Healthy, |acc, check| acc.combine(check.status))
}

/// Liveness probe: the process is up and serving.
pub async fn liveness_handler() -> HealthResponse {
    HealthResponse {
        status: HealthStatus::Healthy,
        timestamp: Utc::now().timestamp(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Readiness probe: every component is answering.
pub async fn readiness_handler(State(checker): State<Arc<HealthChecker>>) -> ReadinessResponse {
    let components = checker.components();
    let not_ready: Vec<String> = components
        .values()
        .filter(|check| check.status == HealthStatus::Unhealthy)
        .map(|check| check.component.clone())
        .collect();
    ReadinessResponse {
        ready: not_ready.is_empty(),
        status: overall(&components),
        timestamp: Utc::now().timestamp(),
        not_ready,
    }
}

/// Per-component detail, including store row counts.
pub async fn components_handler(
    State(checker): State<Arc<HealthChecker>>,
) -> ComponentHealthResponse {
    let components = checker.components();
    ComponentHealthResponse {
        status: overall(&components),
        timestamp: Utc::now().timestamp(),
        components,
    }
}
