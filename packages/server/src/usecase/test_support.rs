//! UseCase テスト用の共通ヘルパー

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    domain::{AvatarUrl, ConnectionId, MessagePusher, RosterRepository, User, Username},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRosterRepository,
    },
};

/// 本物の Repository と MessagePusher を組み合わせたテスト環境
pub struct TestHarness {
    pub repository: Arc<InMemoryRosterRepository>,
    pub message_pusher: Arc<WebSocketMessagePusher>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryRosterRepository::new()),
            message_pusher: Arc::new(WebSocketMessagePusher::new()),
        }
    }

    /// トランスポートへの接続を模擬し、その接続の受信側を返す
    pub async fn connect(&self, connection_id: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.message_pusher
            .register_client(ConnectionId::new(connection_id), tx)
            .await;
        rx
    }

    /// 通知を発生させずに Roster へ直接ユーザーを追加
    pub async fn add_user(&self, connection_id: &str, username: &str) -> User {
        let username = Username::new(username);
        let user = User::new(
            ConnectionId::new(connection_id),
            username.clone(),
            AvatarUrl::generated_for(&username),
        );
        self.repository.upsert(user.clone()).await;
        user
    }
}

/// 受信済みのイベントを全て取り出し、JSON として返す
pub fn events(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
    let mut received = Vec::new();
    while let Ok(text) = rx.try_recv() {
        received.push(serde_json::from_str(&text).unwrap());
    }
    received
}

/// 指定したイベント名のものだけを取り出す
pub fn events_named(rx: &mut mpsc::UnboundedReceiver<String>, name: &str) -> Vec<Value> {
    events(rx)
        .into_iter()
        .filter(|event| event["event"] == name)
        .collect()
}
