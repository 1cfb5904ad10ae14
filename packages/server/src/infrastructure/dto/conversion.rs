//! Conversion logic between DTOs and domain entities.

use crate::domain::{Notification, User};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<User> for dto::UserInfo {
    fn from(model: User) -> Self {
        Self {
            username: model.username.into_string(),
            avatar_url: model.avatar_url.into_string(),
            connection_id: model.connection_id.into_string(),
        }
    }
}

impl From<Notification> for dto::ServerEvent {
    fn from(model: Notification) -> Self {
        match model {
            Notification::SystemMessage { text, timestamp } => {
                Self::SystemMessage(dto::SystemMessagePayload {
                    text,
                    timestamp: timestamp.map(|t| t.into_value()),
                })
            }
            Notification::ReceiveMessage {
                username,
                avatar_url,
                message,
                timestamp,
            } => Self::ReceiveMessage(dto::ReceiveMessagePayload {
                username: username.into_string(),
                avatar_url: avatar_url.into_string(),
                message,
                timestamp: timestamp.into_value(),
            }),
            Notification::UpdateUsers(users) => {
                Self::UpdateUsers(users.into_iter().map(dto::UserInfo::from).collect())
            }
            Notification::UserCount(count) => Self::UserCount(count),
            Notification::Typing {
                is_typing,
                username,
            } => Self::Typing(dto::TypingNotificationPayload {
                is_typing,
                username: username.into_string(),
            }),
        }
    }
}

impl From<Vec<User>> for http::RosterSnapshotDto {
    fn from(users: Vec<User>) -> Self {
        let count = users.len();
        Self {
            users: users.into_iter().map(dto::UserInfo::from).collect(),
            count,
        }
    }
}

/// Serialize a notification into the JSON text frame sent to clients
pub fn to_wire_json(notification: &Notification) -> Result<String, serde_json::Error> {
    serde_json::to_string(&dto::ServerEvent::from(notification.clone()))
}
