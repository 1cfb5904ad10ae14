//! UseCase: チャットへの参加（join）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - Roster への登録、参加者一覧の配信、歓迎メッセージ・入室通知の送り分け
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存参加者がいる状態での参加
//! - エッジケース：同じ接続からの再 join（上書き）、空のユーザー名、タイムスタンプ無し

use std::sync::Arc;

use crate::domain::{
    AvatarUrl, ConnectionId, MessagePusher, Notification, RosterRepository, Timestamp, User,
    Username,
};

use super::{broadcast_roster::RosterBroadcaster, error::CoordinatorError};

/// チャット参加のユースケース
pub struct JoinChatUseCase {
    repository: Arc<dyn RosterRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    roster_broadcaster: RosterBroadcaster,
}

impl JoinChatUseCase {
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        let roster_broadcaster = RosterBroadcaster::new(repository.clone(), message_pusher.clone());
        Self {
            repository,
            message_pusher,
            roster_broadcaster,
        }
    }

    /// チャット参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - join を送ってきた接続（トランスポートが付与した ID）
    /// * `username` - クライアントが名乗ったユーザー名（検証しない）
    /// * `avatar_url` - クライアント指定のアバター URL（空または無しなら生成）
    /// * `timestamp` - クライアントのタイムスタンプ（そのまま返送する）
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - Roster に登録されたユーザー
    /// * `Err(CoordinatorError)` - 参加者一覧または入室通知の配信に失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        username: Username,
        avatar_url: Option<String>,
        timestamp: Option<Timestamp>,
    ) -> Result<User, CoordinatorError> {
        // 1. アバター URL を決定
        let avatar_url = AvatarUrl::resolve(avatar_url, &username);

        // 2. Roster に登録（同じ接続からの再 join は上書き）
        let user = User::new(connection_id.clone(), username, avatar_url);
        self.repository.upsert(user.clone()).await;

        // 3. 参加者一覧を全接続に配信
        self.roster_broadcaster.broadcast().await?;

        // 4. 本人にだけ歓迎メッセージ（届かなくても入室通知は続ける）
        if let Err(e) = self
            .message_pusher
            .push_to(
                &connection_id,
                &Notification::welcome(&user.username, timestamp.clone()),
            )
            .await
        {
            tracing::warn!("Failed to welcome '{}': {}", connection_id, e);
        }

        // 5. 本人以外に入室通知
        self.message_pusher
            .broadcast_except(
                &connection_id,
                &Notification::joined(&user.username, timestamp),
            )
            .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{TestHarness, events, events_named};
    use serde_json::json;

    fn create_usecase(harness: &TestHarness) -> JoinChatUseCase {
        JoinChatUseCase::new(harness.repository.clone(), harness.message_pusher.clone())
    }

    #[tokio::test]
    async fn test_join_fan_out() {
        // テスト項目: 参加者本人には歓迎メッセージ、他の接続には入室通知が 1 件ずつ届く
        // given (前提条件): Bob (A) が参加済みの状態で Carol (B) が接続
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let mut a_rx = harness.connect("a").await;
        usecase
            .execute(ConnectionId::new("a"), Username::new("Bob"), None, None)
            .await
            .unwrap();
        events(&mut a_rx);
        let mut b_rx = harness.connect("b").await;

        // when (操作):
        usecase
            .execute(
                ConnectionId::new("b"),
                Username::new("Carol"),
                None,
                Some(Timestamp::from_client(json!("10:15"))),
            )
            .await
            .unwrap();

        // then (期待する結果):
        let a_events = events(&mut a_rx);
        let b_events = events(&mut b_rx);
        for received in [&a_events, &b_events] {
            assert_eq!(received.len(), 3);
            assert_eq!(received[0]["event"], "updateUsers");
            assert_eq!(received[0]["data"].as_array().unwrap().len(), 2);
            assert_eq!(received[1], json!({"event":"userCount","data":2}));
        }
        assert_eq!(
            b_events[2],
            json!({"event":"systemMessage","data":{"text":"Welcome to the chat, Carol!","timestamp":"10:15"}})
        );
        assert_eq!(
            a_events[2],
            json!({"event":"systemMessage","data":{"text":"Carol joined the chat","timestamp":"10:15"}})
        );
    }

    #[tokio::test]
    async fn test_join_avatar_fallback() {
        // テスト項目: アバター未指定の場合、ユーザー名から生成した URL が登録される
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let _rx = harness.connect("c1").await;

        // when (操作):
        let user = usecase
            .execute(ConnectionId::new("c1"), Username::new("Al Ice"), None, None)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            user.avatar_url.as_str(),
            "https://ui-avatars.com/api/?name=Al%20Ice&background=random&color=fff&size=100"
        );
    }

    #[tokio::test]
    async fn test_rejoin_overwrites_entry() {
        // テスト項目: 同じ接続からの再 join は Roster のエントリを上書きし、人数は増えない
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let mut rx = harness.connect("c1").await;
        usecase
            .execute(ConnectionId::new("c1"), Username::new("alice"), None, None)
            .await
            .unwrap();
        events(&mut rx);

        // when (操作):
        usecase
            .execute(
                ConnectionId::new("c1"),
                Username::new("alicia"),
                Some("https://example.com/alicia.png".to_string()),
                None,
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(harness.repository.count().await, 1);
        let user = harness
            .repository
            .find(&ConnectionId::new("c1"))
            .await
            .unwrap();
        assert_eq!(user.username.as_str(), "alicia");
        assert_eq!(user.avatar_url.as_str(), "https://example.com/alicia.png");
        let counts = events_named(&mut rx, "userCount");
        assert_eq!(counts, vec![json!({"event":"userCount","data":1})]);
    }

    #[tokio::test]
    async fn test_join_with_empty_username_and_no_timestamp() {
        // テスト項目: 空のユーザー名でも拒否されず、タイムスタンプ無しなら timestamp キーが省略される
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let mut rx = harness.connect("c1").await;

        // when (操作):
        let result = usecase
            .execute(ConnectionId::new("c1"), Username::new(""), None, None)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            events_named(&mut rx, "systemMessage"),
            vec![json!({"event":"systemMessage","data":{"text":"Welcome to the chat, !"}})]
        );
    }

    #[tokio::test]
    async fn test_join_with_closed_connection_still_announces() {
        // テスト項目: 本人の接続が既に閉じていても、他の接続には入室通知が届く
        // given (前提条件): A と B が接続済みで、B の受信側だけが破棄されている
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let mut a_rx = harness.connect("a").await;
        let b_rx = harness.connect("b").await;
        drop(b_rx);

        // when (操作):
        let result = usecase
            .execute(ConnectionId::new("b"), Username::new("Carol"), None, None)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(harness.repository.count().await, 1);
        assert_eq!(
            events_named(&mut a_rx, "systemMessage"),
            vec![json!({"event":"systemMessage","data":{"text":"Carol joined the chat"}})]
        );
    }

    #[tokio::test]
    async fn test_join_without_registered_connection_is_not_an_error() {
        // テスト項目: トランスポートに登録されていない接続からの join でも Roster 登録は行われる
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);

        // when (操作):
        let result = usecase
            .execute(ConnectionId::new("ghost"), Username::new("ghost"), None, None)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(harness.repository.count().await, 1);
    }

    #[tokio::test]
    async fn test_join_echoes_null_timestamp() {
        // テスト項目: クライアントが null を送った場合は null のまま返送する
        // given (前提条件):
        let harness = TestHarness::new();
        let usecase = create_usecase(&harness);
        let mut rx = harness.connect("c1").await;

        // when (操作):
        usecase
            .execute(
                ConnectionId::new("c1"),
                Username::new("alice"),
                None,
                Some(Timestamp::from_client(json!(null))),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            events_named(&mut rx, "systemMessage"),
            vec![json!({"event":"systemMessage","data":{"text":"Welcome to the chat, alice!","timestamp":null}})]
        );
    }
}
