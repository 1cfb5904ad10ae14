//! 参加者一覧のブロードキャスト
//!
//! join と切断の両方から使われる共通処理。

use std::sync::Arc;

use crate::domain::{MessagePusher, Notification, RosterRepository};

use super::error::CoordinatorError;

/// 現在の Roster を全接続に配信する
pub struct RosterBroadcaster {
    repository: Arc<dyn RosterRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RosterBroadcaster {
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// `updateUsers`（挿入順の全ユーザー）と `userCount` を全接続に送信
    pub async fn broadcast(&self) -> Result<(), CoordinatorError> {
        let users = self.repository.list().await;
        let count = users.len();

        self.message_pusher
            .broadcast_all(&Notification::UpdateUsers(users))
            .await?;
        self.message_pusher
            .broadcast_all(&Notification::UserCount(count))
            .await?;

        tracing::debug!("Broadcasted roster ({} users)", count);
        Ok(())
    }
}
