//! UI 層（axum によるトランスポート）
//!
//! WebSocket 接続の受付とイベントの入出力、HTTP API を担当します。

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, ServerError};
