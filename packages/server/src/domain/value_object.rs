//! Value Object 定義
//!
//! 接続 ID・ユーザー名・アバター URL・タイムスタンプを型で区別します。
//! ユーザー名はクライアントが送ってきた文字列をそのまま保持し、検証は行いません。

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Base URL of the generated avatar service used when a client sends no avatar
const AVATAR_SERVICE_URL: &str = "https://ui-avatars.com/api/";

/// トランスポートが割り当てる接続 ID
///
/// 接続が生きている間は一意であり、Roster の主キーとして使われる。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 既存の値から ConnectionId を作成
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 新しい接続用にランダムな ID を生成（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// クライアントが join 時に名乗るユーザー名（空文字列も許容）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ユーザーのアバター画像 URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvatarUrl(String);

impl AvatarUrl {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// クライアント指定の URL を優先し、無ければユーザー名から生成する
    ///
    /// 空文字列は指定なしとして扱う。
    pub fn resolve(supplied: Option<String>, username: &Username) -> Self {
        match supplied {
            Some(url) if !url.is_empty() => Self(url),
            _ => Self::generated_for(username),
        }
    }

    /// ユーザー名をキーにした生成アバターサービスの URL
    pub fn generated_for(username: &Username) -> Self {
        Self(format!(
            "{}?name={}&background=random&color=fff&size=100",
            AVATAR_SERVICE_URL,
            encode_uri_component(username.as_str())
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Percent-encode with the unreserved set of JavaScript's `encodeURIComponent`.
///
/// `urlencoding::encode` escapes `! ' ( ) *` as well; those five are restored.
fn encode_uri_component(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// イベントに付与するタイムスタンプ
///
/// クライアントが送ってきた値は形式を問わずそのまま保持し、加工せずに返送する。
/// サーバー側で生成する場合は `HH:MM` 形式の文字列になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(serde_json::Value);

impl Timestamp {
    /// クライアント由来の値から作成
    pub fn from_client(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// サーバー生成の `HH:MM` 文字列から作成
    pub fn from_hhmm(value: impl Into<String>) -> Self {
        Self(serde_json::Value::String(value.into()))
    }

    /// 値として意味を持つか（`null` / `false` / `0` / `""` 以外）
    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            serde_json::Value::Null => false,
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            serde_json::Value::String(s) => !s.is_empty(),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
        }
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}
