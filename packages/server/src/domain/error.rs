//! ドメイン層のエラー型

use thiserror::Error;

/// MessagePusher のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// 送信先の接続が登録されていない
    #[error("Connection '{0}' not found")]
    ClientNotFound(String),

    /// チャンネルへの送信に失敗（受信側が既に閉じている）
    #[error("Failed to push message: {0}")]
    PushFailed(String),

    /// 通知のシリアライズに失敗
    #[error("Failed to serialize notification: {0}")]
    Serialization(String),
}
