//! Repository trait 定義
//!
//! ドメイン層が必要とする Roster へのアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{entity::User, value_object::ConnectionId};

/// Roster Repository trait
///
/// 接続 ID から参加ユーザーへの対応表。列挙順は挿入順。
///
/// 各メソッドは個別にアトミックだが、ハンドラ単位の一貫性（参照・更新と
/// それに伴うブロードキャストが割り込まれないこと）は呼び出し側の
/// `ChatCoordinator` がコマンドを逐次処理することで保証する。
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// ユーザーを追加（同じ接続 ID が既にあれば位置を保ったまま上書き）
    async fn upsert(&self, user: User);

    /// 接続 ID でユーザーを検索
    async fn find(&self, connection_id: &ConnectionId) -> Option<User>;

    /// ユーザーを削除し、削除したユーザーを返す
    async fn remove(&self, connection_id: &ConnectionId) -> Option<User>;

    /// 全ユーザーを挿入順で取得
    async fn list(&self) -> Vec<User>;

    /// 登録ユーザー数を取得
    async fn count(&self) -> usize;
}
