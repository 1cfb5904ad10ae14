//! WebSocket connection handlers.
//!
//! Each connection gets a transport-assigned `ConnectionId` and two tasks:
//! one forwards inbound frames to the coordinator, the other writes the
//! connection's outbound channel to the socket. The coordinator sees
//! `Connect` before any of the connection's events and `Disconnect` after them.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Timestamp, Username},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::{CoordinatorError, CoordinatorHandle},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Route a decoded client event to its coordinator handler
async fn dispatch(
    coordinator: &CoordinatorHandle,
    connection_id: ConnectionId,
    event: ClientEvent,
) -> Result<(), CoordinatorError> {
    match event {
        ClientEvent::Join(payload) => {
            coordinator
                .join(
                    connection_id,
                    Username::new(payload.username),
                    payload.avatar_url,
                    payload.timestamp.map(Timestamp::from_client),
                )
                .await
        }
        ClientEvent::SendMessage(payload) => {
            coordinator
                .send_message(
                    connection_id,
                    payload.message,
                    payload.timestamp.map(Timestamp::from_client),
                )
                .await
        }
        ClientEvent::Typing(payload) => coordinator.typing(connection_id, payload.is_typing).await,
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();

    // Create a channel for this connection to receive notifications
    let (tx, rx) = mpsc::unbounded_channel();
    if let Err(e) = state.coordinator.connect(connection_id.clone(), tx).await {
        tracing::error!("Failed to register connection '{}': {}", connection_id, e);
        return;
    }
    tracing::info!("Connection '{}' opened", connection_id);

    let (sender, mut receiver) = socket.split();

    let coordinator = state.coordinator.clone();
    let reader_id = connection_id.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", reader_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", reader_id, text.as_str());
                    let event = match serde_json::from_str::<ClientEvent>(text.as_str()) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Dropping malformed event from '{}': {}", reader_id, e);
                            continue;
                        }
                    };
                    if let Err(e) = dispatch(&coordinator, reader_id.clone(), event).await {
                        tracing::error!("Failed to dispatch event from '{}': {}", reader_id, e);
                        break;
                    }
                }
                Message::Close(_) => {
                    tracing::debug!("Connection '{}' requested close", reader_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to write this connection's notifications to the socket
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Err(e) = state.coordinator.disconnect(connection_id.clone()).await {
        tracing::warn!("Failed to report disconnect of '{}': {}", connection_id, e);
    }
    tracing::info!("Connection '{}' closed", connection_id);
}
