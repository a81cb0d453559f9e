//! # Todo
//!
//! Todo エンティティと、それを構成する値オブジェクトを定義する。
//!
//! ## 設計判断
//!
//! ### 永続化前後で型を分ける
//!
//! ID は永続化層が採番する。採番前の Todo を [`NewTodo`]、採番後の Todo を
//! [`Todo`] として別の型で表現し、「永続化済みの Todo は必ず ID を持つ」
//! という不変条件を型で保証する。
//!
//! ### 説明文はトリミングしない
//!
//! [`TodoDescription`] は文字数のみを検証する。前後の空白も内容の一部として扱う。

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

/// 説明文の最大文字数（DB: `VARCHAR(255)`）
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// Todo の一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct TodoId(Uuid);

impl TodoId {
    /// 新しい ID を生成する（UUID v7）
    ///
    /// PostgreSQL 実装では DB 側で採番するため、主にインメモリ実装が使用する。
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID から ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// TodoDescription（説明文）
// =========================================================================

/// Todo の説明文（値オブジェクト）
///
/// # 不変条件
///
/// - 1 文字以上 255 文字以下（Unicode スカラー値で数える）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(try_from = "String", into = "String")]
#[display("{_0}")]
pub struct TodoDescription(String);

impl TodoDescription {
    /// 説明文を作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation("description は必須です".to_string()));
        }

        if value.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(DomainError::Validation(format!(
                "description は {MAX_DESCRIPTION_LENGTH} 文字以内である必要があります"
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TodoDescription {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoDescription> for String {
    fn from(value: TodoDescription) -> Self {
        value.0
    }
}

// =========================================================================
// NewTodo / Todo（エンティティ）
// =========================================================================

/// 永続化前の Todo
///
/// ID を持たない。リポジトリの `save` に渡すと ID が採番された [`Todo`] になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    description: TodoDescription,
}

impl NewTodo {
    pub fn new(description: TodoDescription) -> Self {
        Self { description }
    }

    pub fn description(&self) -> &TodoDescription {
        &self.description
    }

    /// 採番された ID を付与して永続化済みの Todo にする
    pub fn into_persisted(self, id: TodoId) -> Todo {
        Todo {
            id,
            description: self.description,
        }
    }
}

/// 永続化済みの Todo エンティティ
///
/// # 不変条件
///
/// - `id` は永続化層が採番した値であり、常に存在する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    id:          TodoId,
    description: TodoDescription,
}

impl Todo {
    /// データベースから Todo を復元する
    pub fn from_db(id: TodoId, description: TodoDescription) -> Self {
        Self { id, description }
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn description(&self) -> &TodoDescription {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::一文字("a")]
    #[case::ちょうど255文字(&"a".repeat(255))]
    #[case::マルチバイト255文字(&"あ".repeat(255))]
    #[case::空白のみ("   ")]
    fn test_説明文は1から255文字を受け入れる(#[case] value: &str) {
        let description = TodoDescription::new(value).unwrap();
        assert_eq!(description.as_str(), value);
    }

    #[rstest]
    #[case::空文字列("")]
    #[case::超過256文字(&"a".repeat(256))]
    #[case::マルチバイト256文字(&"あ".repeat(256))]
    fn test_説明文は範囲外の長さを拒否する(#[case] value: &str) {
        let result = TodoDescription::new(value);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_説明文は前後の空白を保持する() {
        let description = TodoDescription::new("  牛乳を買う  ").unwrap();
        assert_eq!(description.as_str(), "  牛乳を買う  ");
    }

    #[test]
    fn test_説明文のデシリアライズでもバリデーションされる() {
        let result: Result<TodoDescription, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_todoに採番するとidと説明文を持つtodoになる() {
        let id = TodoId::new();
        let description = TodoDescription::new("散歩").unwrap();

        let todo = NewTodo::new(description.clone()).into_persisted(id);

        assert_eq!(todo.id(), &id);
        assert_eq!(todo.description(), &description);
    }

    #[test]
    fn test_todoのjsonラウンドトリップでidと説明文が保たれる() {
        let todo = Todo::from_db(TodoId::new(), TodoDescription::new("洗濯").unwrap());

        let json = serde_json::to_string(&todo).unwrap();
        let restored: Todo = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, todo);
    }

    #[test]
    fn test_todoのjson形状はidとdescriptionのみ() {
        let uuid = Uuid::nil();
        let todo = Todo::from_db(TodoId::from_uuid(uuid), TodoDescription::new("掃除").unwrap());

        let json = serde_json::to_value(&todo).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "description": "掃除"
            })
        );
    }
}
