//! API request handlers

use crate::neo4j::models::GraphSnapshot;
use crate::neo4j::GraphStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

/// Shared server state
pub struct ServerState {
    /// Store handle injected at startup and shared by every request
    pub store: Arc<dyn GraphStore>,
}

/// Shared API state
pub type ApiState = Arc<ServerState>;

impl ServerState {
    pub fn new(store: Arc<dyn GraphStore>) -> ApiState {
        Arc::new(Self { store })
    }
}

// ============================================================================
// Health check
// ============================================================================

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub neo4j: String,
}

/// Health check handler. Verifies actual connectivity to Neo4j.
///
/// Returns:
/// - 200 + `"ok"` if Neo4j answers
/// - 503 + `"unhealthy"` otherwise
pub async fn health(State(state): State<ApiState>) -> (StatusCode, Json<HealthResponse>) {
    let neo4j_ok = state.store.health_check().await.unwrap_or(false);

    let (http_status, status) = if neo4j_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            neo4j: if neo4j_ok {
                "connected".to_string()
            } else {
                "disconnected".to_string()
            },
        }),
    )
}

// ============================================================================
// Graph
// ============================================================================

/// Project the current stops and connections.
///
/// Runs a fresh projection on every request; nothing is cached.
pub async fn get_graph(State(state): State<ApiState>) -> Result<Json<GraphSnapshot>, AppError> {
    let snapshot = state.store.get_graph_snapshot().await.map_err(|e| {
        tracing::error!("Graph projection failed: {:#}", e);
        AppError::Internal(e)
    })?;

    tracing::debug!(
        "Projected {} bus stops and {} connections",
        snapshot.bus_stops.len(),
        snapshot.connections.len()
    );

    Ok(Json(snapshot))
}

// ============================================================================
// Error handling
// ============================================================================

/// Application error type.
///
/// Rendered as a plain-text body so the browser console shows the raw
/// store error.
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e)),
        };

        (status, message).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}
