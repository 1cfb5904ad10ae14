//! サーバーからクライアントへ通知するイベント
//!
//! ワイヤ形式（JSON）への変換は Infrastructure 層の DTO が担当します。

use super::{
    entity::User,
    value_object::{AvatarUrl, Timestamp, Username},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// サーバーが発行するお知らせ（入室・退室・歓迎メッセージ）
    SystemMessage {
        text: String,
        timestamp: Option<Timestamp>,
    },
    /// ユーザーが送信したチャットメッセージ
    ReceiveMessage {
        username: Username,
        avatar_url: AvatarUrl,
        message: String,
        timestamp: Timestamp,
    },
    /// 現在の参加者一覧（挿入順）
    UpdateUsers(Vec<User>),
    /// 現在の参加者数
    UserCount(usize),
    /// 入力中インジケーター
    Typing { is_typing: bool, username: Username },
}

impl Notification {
    pub fn welcome(username: &Username, timestamp: Option<Timestamp>) -> Self {
        Self::SystemMessage {
            text: format!("Welcome to the chat, {}!", username),
            timestamp,
        }
    }

    pub fn joined(username: &Username, timestamp: Option<Timestamp>) -> Self {
        Self::SystemMessage {
            text: format!("{} joined the chat", username),
            timestamp,
        }
    }

    pub fn left(username: &Username, timestamp: Timestamp) -> Self {
        Self::SystemMessage {
            text: format!("{} left the chat", username),
            timestamp: Some(timestamp),
        }
    }
}
