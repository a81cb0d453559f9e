//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ID は DB が採番**: `INSERT ... RETURNING` で採番済みの行を受け取る
//! - **削除は冪等**: 存在しない ID の削除はエラーにしない
//! - **順序は保証しない**: `find_all` は ORDER BY を付けない

use async_trait::async_trait;
use sqlx::PgPool;
use todo_domain::todo::{NewTodo, Todo, TodoDescription, TodoId};
use uuid::Uuid;

use crate::error::InfraError;

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Todo を保存し、ID が採番された Todo を返す
    async fn save(&self, todo: &NewTodo) -> Result<Todo, InfraError>;

    /// ID で Todo を検索する
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError>;

    /// すべての Todo を取得する
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

    /// ID で Todo を削除する（存在しなければ何もしない）
    async fn delete_by_id(&self, id: &TodoId) -> Result<(), InfraError>;
}

/// `todos` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id:          Uuid,
    description: String,
}

impl TryFrom<TodoRow> for Todo {
    type Error = InfraError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        // CHECK 制約があるため通常は失敗しない
        let description = TodoDescription::new(row.description)
            .map_err(|e| InfraError::unexpected(format!("todos.id={}: {e}", row.id)))?;
        Ok(Todo::from_db(TodoId::from_uuid(row.id), description))
    }
}

/// PostgreSQL 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn save(&self, todo: &NewTodo) -> Result<Todo, InfraError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (description)
            VALUES ($1)
            RETURNING id, description
            "#,
        )
        .bind(todo.description().as_str())
        .fetch_one(&self.pool)
        .await?;

        Todo::try_from(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(todo_id = %id))]
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, description
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Todo::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, description
            FROM todos
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(todo_id = %id))]
    async fn delete_by_id(&self, id: &TodoId) -> Result<(), InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await?;

        tracing::debug!(rows_affected = result.rows_affected(), "Todo を削除しました");

        Ok(())
    }
}
