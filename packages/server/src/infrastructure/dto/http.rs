//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::UserInfo;

/// Health check response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

/// Roster snapshot returned by `GET /api/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshotDto {
    pub users: Vec<UserInfo>,
    pub count: usize,
}
