//! UseCase: メッセージ送信（sendMessage）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者自身を含む全接続へのブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：join 済みユーザーの送信
//! - 異常系：join していない接続からの送信（何もしない）
//! - エッジケース：タイムスタンプ無し・falsy なタイムスタンプ（サーバー時刻で補完）

use std::sync::Arc;

use hearth_shared::time::{Clock, local_hhmm};

use crate::domain::{ConnectionId, MessagePusher, Notification, RosterRepository, Timestamp};

use super::error::CoordinatorError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn RosterRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Notification))` - 全接続に配信した `receiveMessage`
    /// * `Ok(None)` - 送信元が join していないため何もしなかった
    /// * `Err(CoordinatorError)` - 配信失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        message: String,
        timestamp: Option<Timestamp>,
    ) -> Result<Option<Notification>, CoordinatorError> {
        let Some(user) = self.repository.find(connection_id).await else {
            tracing::debug!(
                "Ignoring message from connection '{}' that has not joined",
                connection_id
            );
            return Ok(None);
        };

        let timestamp = timestamp
            .filter(Timestamp::is_truthy)
            .unwrap_or_else(|| Timestamp::from_hhmm(local_hhmm(self.clock.as_ref())));

        let notification = Notification::ReceiveMessage {
            username: user.username,
            avatar_url: user.avatar_url,
            message,
            timestamp,
        };

        // 送信者自身も含めて配信
        self.message_pusher.broadcast_all(&notification).await?;

        Ok(Some(notification))
    }
}
