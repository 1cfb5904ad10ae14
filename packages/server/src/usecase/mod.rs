//! UseCase 層
//!
//! クライアントイベントごとのユースケースと、それらを逐次実行する
//! `ChatCoordinator` を提供します。

mod broadcast_roster;
mod coordinator;
mod disconnect_user;
mod error;
mod join_chat;
mod send_message;
#[cfg(test)]
mod test_support;
mod typing;

pub use broadcast_roster::RosterBroadcaster;
pub use coordinator::{ChatCoordinator, CoordinatorCommand, CoordinatorHandle};
pub use disconnect_user::DisconnectUserUseCase;
pub use error::CoordinatorError;
pub use join_chat::JoinChatUseCase;
pub use send_message::SendMessageUseCase;
pub use typing::TypingUseCase;
