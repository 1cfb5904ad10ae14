//! InMemory Roster Repository 実装
//!
//! ドメイン層が定義する RosterRepository trait の具体的な実装。
//! `Vec<User>` をインメモリ DB として使用し、挿入順を保持します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RosterRepository, User};

/// インメモリ Roster Repository 実装
///
/// インスタンスごとに独立した Roster を持つ（グローバル状態は持たない）。
#[derive(Default)]
pub struct InMemoryRosterRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryRosterRepository {
    /// 空の InMemoryRosterRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn upsert(&self, user: User) {
        let mut users = self.users.lock().await;
        match users
            .iter()
            .position(|u| u.connection_id == user.connection_id)
        {
            Some(index) => users[index] = user,
            None => users.push(user),
        }
    }

    async fn find(&self, connection_id: &ConnectionId) -> Option<User> {
        let users = self.users.lock().await;
        users
            .iter()
            .find(|u| &u.connection_id == connection_id)
            .cloned()
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<User> {
        let mut users = self.users.lock().await;
        let index = users
            .iter()
            .position(|u| &u.connection_id == connection_id)?;
        Some(users.remove(index))
    }

    async fn list(&self) -> Vec<User> {
        let users = self.users.lock().await;
        users.clone()
    }

    async fn count(&self) -> usize {
        let users = self.users.lock().await;
        users.len()
    }
}
