//! エンティティ定義

use super::value_object::{AvatarUrl, ConnectionId, Username};

/// Roster に登録される参加ユーザー（接続ごとに 1 件）
///
/// join 時に作成され、切断時に削除される。更新操作は存在しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub connection_id: ConnectionId,
    pub username: Username,
    pub avatar_url: AvatarUrl,
}

impl User {
    pub fn new(connection_id: ConnectionId, username: Username, avatar_url: AvatarUrl) -> Self {
        Self {
            connection_id,
            username,
            avatar_url,
        }
    }
}
