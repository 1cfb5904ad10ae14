//! WebSocket event DTOs.
//!
//! Every frame is a JSON text frame shaped as `{"event": <name>, "data": <payload>}`.
//! Missing or `null` payload fields are filled with defaults instead of rejecting
//! the frame: `username` / `message` become `""`, `isTyping` becomes `false`, and
//! `avatarUrl` stays `None`. A client `timestamp` is kept verbatim, `null` included,
//! and is `None` only when the key is absent.

use serde::{Deserialize, Deserializer, Serialize};

/// `null` を型のデフォルト値として扱う
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// キーが存在すれば `null` も含めてそのまま保持する
fn present_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// Client → Server event
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    Join(JoinPayload),
    SendMessage(SendMessagePayload),
    Typing(TypingPayload),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "present_value")]
    pub timestamp: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "present_value")]
    pub timestamp: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_typing: bool,
}

/// Server → Client event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    SystemMessage(SystemMessagePayload),
    ReceiveMessage(ReceiveMessagePayload),
    UpdateUsers(Vec<UserInfo>),
    UserCount(usize),
    Typing(TypingNotificationPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMessagePayload {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveMessagePayload {
    pub username: String,
    pub avatar_url: String,
    pub message: String,
    pub timestamp: serde_json::Value,
}

/// Roster entry as sent in `updateUsers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub username: String,
    pub avatar_url: String,
    pub connection_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingNotificationPayload {
    pub is_typing: bool,
    pub username: String,
}
