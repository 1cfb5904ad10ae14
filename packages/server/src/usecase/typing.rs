//! UseCase: 入力中インジケーター（typing）

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Notification, RosterRepository};

use super::error::CoordinatorError;

/// 入力中通知のユースケース
///
/// キー入力イベントはそのまま 1 対 1 で中継する（間引きはしない）。
pub struct TypingUseCase {
    repository: Arc<dyn RosterRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl TypingUseCase {
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 送信元以外の全接続に `typing` を配信する。未参加の接続からの場合は何もしない。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        is_typing: bool,
    ) -> Result<Option<Notification>, CoordinatorError> {
        let Some(user) = self.repository.find(connection_id).await else {
            tracing::debug!(
                "Ignoring typing event from connection '{}' that has not joined",
                connection_id
            );
            return Ok(None);
        };

        let notification = Notification::Typing {
            is_typing,
            username: user.username,
        };
        self.message_pusher
            .broadcast_except(connection_id, &notification)
            .await?;

        Ok(Some(notification))
    }
}
