//! MessagePusher trait 定義
//!
//! クライアントへの通知手段（トランスポートのアドレッシング）を抽象化します。
//!
//! - `push_to`: 特定の 1 接続
//! - `broadcast_except`: 送信元以外の全接続
//! - `broadcast_all`: 全接続
//!
//! 「全接続」は join 済みかどうかに関係なく、登録されている全ての接続を指す。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, notification::Notification, value_object::ConnectionId};

/// 接続ごとの送信チャンネル（シリアライズ済み JSON を流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の登録を解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続に通知
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 指定した接続以外の全接続に通知（一部の送信失敗は許容）
    async fn broadcast_except(
        &self,
        exclude: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 全接続に通知（一部の送信失敗は許容）
    async fn broadcast_all(&self, notification: &Notification) -> Result<(), MessagePushError>;
}
