//! Server state shared by the axum handlers.

use crate::usecase::CoordinatorHandle;

/// Shared application state
pub struct AppState {
    /// Coordinator（Roster を所有するアクター）へのハンドル
    pub coordinator: CoordinatorHandle,
}
