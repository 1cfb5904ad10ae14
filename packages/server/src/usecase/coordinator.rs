//! Roster & Broadcast Coordinator
//!
//! Roster を所有し、クライアントイベントを 1 件ずつ最後まで処理するアクター。
//! 全てのハンドラは単一のタスク上で逐次実行されるため、あるハンドラの
//! Roster 更新と配信の途中に別のハンドラが割り込むことはない。

use std::sync::Arc;

use hearth_shared::time::Clock;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{
    ConnectionId, MessagePusher, PusherChannel, RosterRepository, Timestamp, User, Username,
};

use super::{
    disconnect_user::DisconnectUserUseCase, error::CoordinatorError, join_chat::JoinChatUseCase,
    send_message::SendMessageUseCase, typing::TypingUseCase,
};

/// Channel buffer size for coordinator commands
const COMMAND_BUFFER_SIZE: usize = 256;

/// Commands sent from connection handlers to the coordinator
#[derive(Debug)]
pub enum CoordinatorCommand {
    /// Transport accepted a new connection
    Connect {
        connection_id: ConnectionId,
        sender: PusherChannel,
    },
    /// Client announced its profile
    Join {
        connection_id: ConnectionId,
        username: Username,
        avatar_url: Option<String>,
        timestamp: Option<Timestamp>,
    },
    /// Client sent a chat message
    SendMessage {
        connection_id: ConnectionId,
        message: String,
        timestamp: Option<Timestamp>,
    },
    /// Client started or stopped typing
    Typing {
        connection_id: ConnectionId,
        is_typing: bool,
    },
    /// Transport closed the connection
    Disconnect { connection_id: ConnectionId },
    /// Read the current roster (insertion order)
    Snapshot { reply: oneshot::Sender<Vec<User>> },
}

/// The coordinator actor
pub struct ChatCoordinator {
    repository: Arc<dyn RosterRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    join_chat_usecase: JoinChatUseCase,
    send_message_usecase: SendMessageUseCase,
    typing_usecase: TypingUseCase,
    disconnect_user_usecase: DisconnectUserUseCase,
    receiver: mpsc::Receiver<CoordinatorCommand>,
}

impl ChatCoordinator {
    /// Create a coordinator together with the handle used to send it commands
    pub fn new(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> (Self, CoordinatorHandle) {
        let (sender, receiver) = mpsc::channel(COMMAND_BUFFER_SIZE);
        let coordinator = Self {
            join_chat_usecase: JoinChatUseCase::new(repository.clone(), message_pusher.clone()),
            send_message_usecase: SendMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            typing_usecase: TypingUseCase::new(repository.clone(), message_pusher.clone()),
            disconnect_user_usecase: DisconnectUserUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock,
            ),
            repository,
            message_pusher,
            receiver,
        };
        (coordinator, CoordinatorHandle { sender })
    }

    /// Spawn the coordinator on the current tokio runtime
    pub fn spawn(
        repository: Arc<dyn RosterRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> CoordinatorHandle {
        let (coordinator, handle) = Self::new(repository, message_pusher, clock);
        tokio::spawn(coordinator.run());
        handle
    }

    /// Run the event loop until every handle is dropped
    pub async fn run(mut self) {
        tracing::info!("Chat coordinator started");

        while let Some(command) = self.receiver.recv().await {
            self.handle_command(command).await;
        }

        tracing::info!("Chat coordinator shutting down");
    }

    /// Process a single command to completion
    async fn handle_command(&self, command: CoordinatorCommand) {
        match command {
            CoordinatorCommand::Connect {
                connection_id,
                sender,
            } => {
                self.message_pusher
                    .register_client(connection_id.clone(), sender)
                    .await;
                tracing::info!("Connection '{}' registered", connection_id);
            }
            CoordinatorCommand::Join {
                connection_id,
                username,
                avatar_url,
                timestamp,
            } => {
                match self
                    .join_chat_usecase
                    .execute(connection_id.clone(), username, avatar_url, timestamp)
                    .await
                {
                    Ok(user) => tracing::info!(
                        "'{}' joined the chat as connection '{}' ({} online)",
                        user.username,
                        connection_id,
                        self.repository.count().await
                    ),
                    Err(e) => tracing::warn!("Failed to handle join for '{}': {}", connection_id, e),
                }
            }
            CoordinatorCommand::SendMessage {
                connection_id,
                message,
                timestamp,
            } => {
                if let Err(e) = self
                    .send_message_usecase
                    .execute(&connection_id, message, timestamp)
                    .await
                {
                    tracing::warn!("Failed to relay message from '{}': {}", connection_id, e);
                }
            }
            CoordinatorCommand::Typing {
                connection_id,
                is_typing,
            } => {
                if let Err(e) = self.typing_usecase.execute(&connection_id, is_typing).await {
                    tracing::warn!("Failed to relay typing from '{}': {}", connection_id, e);
                }
            }
            CoordinatorCommand::Disconnect { connection_id } => {
                match self.disconnect_user_usecase.execute(&connection_id).await {
                    Ok(Some(user)) => tracing::info!(
                        "'{}' left the chat (connection '{}')",
                        user.username,
                        connection_id
                    ),
                    Ok(None) => {
                        tracing::info!("Connection '{}' closed before joining", connection_id)
                    }
                    Err(e) => tracing::warn!(
                        "Failed to handle disconnect for '{}': {}",
                        connection_id,
                        e
                    ),
                }
            }
            CoordinatorCommand::Snapshot { reply } => {
                let users = self.repository.list().await;
                // 要求元が既にいなくなっていても問題ない
                let _ = reply.send(users);
            }
        }
    }
}

/// Cloneable handle for sending commands to the coordinator
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    sender: mpsc::Sender<CoordinatorCommand>,
}

impl CoordinatorHandle {
    async fn send(&self, command: CoordinatorCommand) -> Result<(), CoordinatorError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| CoordinatorError::Closed)
    }

    pub async fn connect(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), CoordinatorError> {
        self.send(CoordinatorCommand::Connect {
            connection_id,
            sender,
        })
        .await
    }

    pub async fn join(
        &self,
        connection_id: ConnectionId,
        username: Username,
        avatar_url: Option<String>,
        timestamp: Option<Timestamp>,
    ) -> Result<(), CoordinatorError> {
        self.send(CoordinatorCommand::Join {
            connection_id,
            username,
            avatar_url,
            timestamp,
        })
        .await
    }

    pub async fn send_message(
        &self,
        connection_id: ConnectionId,
        message: String,
        timestamp: Option<Timestamp>,
    ) -> Result<(), CoordinatorError> {
        self.send(CoordinatorCommand::SendMessage {
            connection_id,
            message,
            timestamp,
        })
        .await
    }

    pub async fn typing(
        &self,
        connection_id: ConnectionId,
        is_typing: bool,
    ) -> Result<(), CoordinatorError> {
        self.send(CoordinatorCommand::Typing {
            connection_id,
            is_typing,
        })
        .await
    }

    pub async fn disconnect(&self, connection_id: ConnectionId) -> Result<(), CoordinatorError> {
        self.send(CoordinatorCommand::Disconnect { connection_id })
            .await
    }

    /// Current roster, read through the coordinator's event loop
    pub async fn snapshot(&self) -> Result<Vec<User>, CoordinatorError> {
        let (reply, response) = oneshot::channel();
        self.send(CoordinatorCommand::Snapshot { reply }).await?;
        response.await.map_err(|_| CoordinatorError::Closed)
    }
}
