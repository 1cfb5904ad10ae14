//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - 通知の JSON シリアライズとアドレッシング（push_to, broadcast_except, broadcast_all）
//!
//! ## 設計ノート
//!
//! WebSocket 接続の受付と sender の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、通知の送信だけを担当します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, Notification, PusherChannel},
    infrastructure::dto::conversion::to_wire_json,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(connection_id.clone(), tx).await;
/// pusher.push_to(&connection_id, &Notification::UserCount(1)).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    ///
    /// Key: connection_id
    /// Value: PusherChannel
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    async fn fan_out(
        &self,
        exclude: Option<&ConnectionId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = to_wire_json(notification)
            .map_err(|e| MessagePushError::Serialization(e.to_string()))?;
        let clients = self.clients.lock().await;

        for (connection_id, sender) in clients.iter() {
            if exclude == Some(connection_id) {
                continue;
            }
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = sender.send(content.clone()) {
                tracing::warn!(
                    "Failed to push message to connection '{}': {}",
                    connection_id,
                    e
                );
            } else {
                tracing::trace!("Broadcasted message to connection '{}'", connection_id);
            }
        }

        Ok(())
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = to_wire_json(notification)
            .map_err(|e| MessagePushError::Serialization(e.to_string()))?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::trace!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast_except(
        &self,
        exclude: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        self.fan_out(Some(exclude), notification).await
    }

    async fn broadcast_all(&self, notification: &Notification) -> Result<(), MessagePushError> {
        self.fan_out(None, notification).await
    }
}
