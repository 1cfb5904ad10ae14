//! Infrastructure 層
//!
//! - `dto`: ワイヤ形式（WebSocket / HTTP）の型と変換
//! - `repository`: RosterRepository の実装
//! - `message_pusher`: MessagePusher の実装

pub mod dto;
pub mod message_pusher;
pub mod repository;
