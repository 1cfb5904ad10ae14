//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::MessagePushError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    /// 通知の送信に失敗
    #[error(transparent)]
    Push(#[from] MessagePushError),

    /// Coordinator のイベントループが既に停止している
    #[error("Chat coordinator is not running")]
    Closed,
}
