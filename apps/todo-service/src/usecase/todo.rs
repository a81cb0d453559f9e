//! Todo 管理ユースケース

use std::sync::Arc;

use todo_domain::{
    DomainError,
    todo::{NewTodo, Todo, TodoDescription, TodoId},
};
use todo_infra::repository::TodoRepository;

use crate::{
    client::{PlaceholderClient, RemoteItem},
    error::ApiError,
};

/// 一覧の要素
///
/// ローカルに保存された Todo か、Placeholder API から取得した要素のいずれか。
#[derive(Debug, Clone, PartialEq)]
pub enum TodoEntry {
    Local(Todo),
    Remote(RemoteItem),
}

/// Todo 管理ユースケース
pub struct TodoUseCaseImpl {
    todo_repository:    Arc<dyn TodoRepository>,
    placeholder_client: Arc<dyn PlaceholderClient>,
}

impl TodoUseCaseImpl {
    pub fn new(
        todo_repository: Arc<dyn TodoRepository>,
        placeholder_client: Arc<dyn PlaceholderClient>,
    ) -> Self {
        Self {
            todo_repository,
            placeholder_client,
        }
    }

    /// Todo を作成する
    ///
    /// ID はリポジトリが採番する。
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, description: TodoDescription) -> Result<Todo, ApiError> {
        let todo = self.todo_repository.save(&NewTodo::new(description)).await?;
        tracing::info!(todo_id = %todo.id(), "Todo を作成");
        Ok(todo)
    }

    /// Todo を削除する
    ///
    /// 存在しない ID でもエラーにしない（冪等）。
    #[tracing::instrument(skip_all, fields(todo_id = %id))]
    pub async fn delete(&self, id: &TodoId) -> Result<(), ApiError> {
        self.todo_repository.delete_by_id(id).await?;
        Ok(())
    }

    /// ID で Todo を取得する
    ///
    /// 存在しない場合は `NotFound` を返す。
    #[tracing::instrument(skip_all, fields(todo_id = %id))]
    pub async fn find_by_id(&self, id: &TodoId) -> Result<Todo, ApiError> {
        self.todo_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound {
                    entity_type: "Todo",
                    id:          id.to_string(),
                }
                .into()
            })
    }

    /// ローカルの Todo と Placeholder API の要素を連結した一覧を取得する
    ///
    /// ローカル分が先、リモート分が後。どちらかが失敗した場合は一覧全体を失敗とする。
    #[tracing::instrument(skip_all)]
    pub async fn find_all(&self) -> Result<Vec<TodoEntry>, ApiError> {
        let local = self.todo_repository.find_all().await?;
        let remote = self.placeholder_client.request_all().await?;

        tracing::debug!(local = local.len(), remote = remote.len(), "一覧を連結");

        Ok(local
            .into_iter()
            .map(TodoEntry::Local)
            .chain(remote.into_iter().map(TodoEntry::Remote))
            .collect())
    }
}
