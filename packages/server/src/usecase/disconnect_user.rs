//! UseCase: 切断処理（disconnect）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUserUseCase::execute() メソッド
//! - 退室通知 → Roster から削除 → 参加者一覧の再配信、の順序
//!
//! ### どのような状況を想定しているか
//! - 正常系：join 済みユーザーの切断
//! - エッジケース：join せずに切断（通知も Roster の変更も無し）

use std::sync::Arc;

use hearth_shared::time::{Clock, local_hhmm};

use crate::domain::{
    ConnectionId, MessagePusher, Notification, RosterRepository, Timestamp, User,
};

use super::{broadcast_roster::RosterBroadcaster, error::CoordinatorError};

/// 切断のユースケース
pub struct DisconnectUserUseCase {
    repository: Arc<dyn RosterRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    roster_broadcaster: RosterBroadcaster,
    clock: Arc<dyn Clock>,
}

impl DisconnectUserUseCase {
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let roster_broadcaster = RosterBroadcaster::new(repository.clone(), message_pusher.clone());
        Self {
            repository,
            message_pusher,
            roster_broadcaster,
            clock,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - Roster から削除したユーザー
    /// * `Ok(None)` - join していない接続だったため何もしなかった
    /// * `Err(CoordinatorError)` - 配信失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<User>, CoordinatorError> {
        // 0. 閉じた接続は以降の配信先に含めない
        self.message_pusher.unregister_client(connection_id).await;

        // 1. Roster を確認（join していなければ終了）
        let Some(user) = self.repository.find(connection_id).await else {
            tracing::debug!(
                "Connection '{}' closed without joining; nothing to announce",
                connection_id
            );
            return Ok(None);
        };

        // 2. 退室通知を全接続へ
        let timestamp = Timestamp::from_hhmm(local_hhmm(self.clock.as_ref()));
        self.message_pusher
            .broadcast_all(&Notification::left(&user.username, timestamp))
            .await?;

        // 3. Roster から削除
        self.repository.remove(connection_id).await;

        // 4. 参加者一覧を再配信
        self.roster_broadcaster.broadcast().await?;

        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{TestHarness, events};
    use hearth_shared::time::FixedClock;
    use serde_json::json;

    fn create_usecase(harness: &TestHarness) -> DisconnectUserUseCase {
        DisconnectUserUseCase::new(
            harness.repository.clone(),
            harness.message_pusher.clone(),
            Arc::new(FixedClock::at(21, 3).unwrap()),
        )
    }

    #[tokio::test]
    async fn test_disconnect_joined_user() {
        // テスト項目: 切断すると退室通知 → updateUsers → userCount の順で残りの接続に届く
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let alice_rx = harness.connect("alice").await;
        let mut bob_rx = harness.connect("bob").await;
        harness.add_user("alice", "Alice").await;
        harness.add_user("bob", "Bob").await;
        drop(alice_rx);

        // when (操作):
        let removed = usecase.execute(&ConnectionId::new("alice")).await.unwrap();

        // then (期待する結果):
        assert_eq!(removed.unwrap().username.as_str(), "Alice");
        assert_eq!(harness.repository.count().await, 1);
        let received = events(&mut bob_rx);
        assert_eq!(received.len(), 3);
        assert_eq!(
            received[0],
            json!({"event":"systemMessage","data":{"text":"Alice left the chat","timestamp":"21:03"}})
        );
        assert_eq!(received[1]["event"], "updateUsers");
        assert_eq!(received[1]["data"].as_array().unwrap().len(), 1);
        assert_eq!(received[1]["data"][0]["username"], "Bob");
        assert_eq!(received[2], json!({"event":"userCount","data":1}));
    }

    #[tokio::test]
    async fn test_disconnect_without_join_is_noop() {
        // テスト項目: join せずに切断した場合、通知は送られず Roster も変わらない
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let _stranger_rx = harness.connect("stranger").await;
        let mut bob_rx = harness.connect("bob").await;
        harness.add_user("bob", "Bob").await;

        // when (操作):
        let removed = usecase
            .execute(&ConnectionId::new("stranger"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(removed, None);
        assert_eq!(harness.repository.count().await, 1);
        assert!(events(&mut bob_rx).is_empty());
    }

    #[tokio::test]
    async fn test_disconnected_connection_receives_nothing() {
        // テスト項目: 切断した接続自身には退室通知が送られない
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let mut alice_rx = harness.connect("alice").await;
        harness.add_user("alice", "Alice").await;

        // when (操作):
        usecase.execute(&ConnectionId::new("alice")).await.unwrap();

        // then (期待する結果):
        assert!(events(&mut alice_rx).is_empty());
        assert_eq!(harness.repository.count().await, 0);
    }
}
