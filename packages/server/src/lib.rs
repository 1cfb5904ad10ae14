//! Real-time chat relay library.
//!
//! Clients connect over WebSocket, announce a username, send messages and
//! typing events, and receive broadcasts of messages, system notices, and
//! the live roster.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
