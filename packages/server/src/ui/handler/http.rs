//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::http::{HealthDto, RosterSnapshotDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Current roster (insertion order) and its size
pub async fn get_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RosterSnapshotDto>, StatusCode> {
    match state.coordinator.snapshot().await {
        Ok(users) => Ok(Json(users.into())),
        Err(e) => {
            tracing::error!("Failed to read roster snapshot: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
