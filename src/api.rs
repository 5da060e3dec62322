//! REST API server for the trading plan generator
//!
//! Exposes plan generation via HTTP for the frontend collaborator. This
//! layer owns the single in-flight flag: one submission at a time, a second
//! one gets 409 while the first is outstanding.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::error::PlanError;
use crate::generator::PlanGenerator;
use crate::models::PlanConfig;

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub generator: Arc<PlanGenerator>,
    /// One submission in flight at a time; owned here, never global
    pub in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when the submission finishes, on every path.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// =============================
/// Handlers
/// =============================

async fn health() -> Json<ApiResponse> {
    Json(ApiResponse::success(serde_json::json!({ "status": "ok" })))
}

async fn generate_plan(
    State(state): State<ApiState>,
    Json(config): Json<PlanConfig>,
) -> (StatusCode, Json<ApiResponse>) {
    let Some(_guard) = InFlightGuard::acquire(&state.in_flight) else {
        return (
            StatusCode::CONFLICT,
            Json(ApiResponse::error(
                "A plan generation is already in progress.".to_string(),
            )),
        );
    };

    match state.generator.generate(&config).await {
        Ok(generated) => {
            info!(plan_id = ?generated.plan_id, "Plan request served");
            (StatusCode::OK, Json(ApiResponse::success(generated)))
        }
        Err(e) => {
            // Logs keep the kind; the client gets the one generic message.
            warn!(kind = e.kind(), "Plan request failed: {}", e);
            let status = match e {
                PlanError::Configuration(_) => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, Json(ApiResponse::error(e.user_message().to_string())))
        }
    }
}

/// =============================
/// Server
/// =============================

pub fn build_router(generator: Arc<PlanGenerator>) -> Router {
    let state = ApiState {
        generator,
        in_flight: Arc::new(AtomicBool::new(false)),
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/plans", post(generate_plan))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(generator: Arc<PlanGenerator>, port: u16) -> std::io::Result<()> {
    let app = build_router(generator);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("API server listening on port {}", port);

    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_flag_admits_one_submission() {
        let flag = Arc::new(AtomicBool::new(false));

        let first = InFlightGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(InFlightGuard::acquire(&flag).is_none());

        drop(first);
        assert!(InFlightGuard::acquire(&flag).is_some());
    }

    #[test]
    fn test_error_envelope_shape() {
        let response = ApiResponse::error("boom".to_string());
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("boom"));
        assert!(response.data.is_none());
    }
}
