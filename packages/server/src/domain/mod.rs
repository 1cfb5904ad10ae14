//! ドメイン層
//!
//! Roster のエンティティ・値オブジェクトと、Infrastructure 層が実装する
//! インターフェース（Repository / MessagePusher）を定義します。

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod notification;
pub mod repository;
pub mod value_object;

pub use entity::User;
pub use error::MessagePushError;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use notification::Notification;
pub use repository::RosterRepository;
pub use value_object::{AvatarUrl, ConnectionId, Timestamp, Username};
