//! # テスト用モックリポジトリ
//!
//! ユースケーステスト・API テストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todo-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use todo_domain::todo::{NewTodo, Todo, TodoId};

use crate::{error::InfraError, repository::TodoRepository};

/// インメモリの TodoRepository
///
/// 挿入順を保持する。ID は UUID v7 で採番する。
/// `fail_with_unexpected` を設定すると、すべての操作がエラーを返す。
#[derive(Clone, Default)]
pub struct MockTodoRepository {
    todos:   Arc<Mutex<Vec<Todo>>>,
    failing: Arc<Mutex<Option<String>>>,
}

impl MockTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みの Todo 数を返す
    pub fn len(&self) -> usize {
        self.todos.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 以降の操作をすべて失敗させる
    pub fn fail_with_unexpected(&self, msg: impl Into<String>) {
        *self.failing.lock().unwrap() = Some(msg.into());
    }

    fn check_failing(&self) -> Result<(), InfraError> {
        match self.failing.lock().unwrap().as_ref() {
            Some(msg) => Err(InfraError::unexpected(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn save(&self, todo: &NewTodo) -> Result<Todo, InfraError> {
        self.check_failing()?;
        let saved = todo.clone().into_persisted(TodoId::new());
        self.todos.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
        self.check_failing()?;
        Ok(self
            .todos
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        self.check_failing()?;
        Ok(self.todos.lock().unwrap().clone())
    }

    async fn delete_by_id(&self, id: &TodoId) -> Result<(), InfraError> {
        self.check_failing()?;
        self.todos.lock().unwrap().retain(|t| t.id() != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use todo_domain::todo::TodoDescription;

    use super::*;

    fn new_todo(description: &str) -> NewTodo {
        NewTodo::new(TodoDescription::new(description).unwrap())
    }

    #[tokio::test]
    async fn test_saveで採番されfind_allで挿入順に返る() {
        let repo = MockTodoRepository::new();

        let a = repo.save(&new_todo("A")).await.unwrap();
        let b = repo.save(&new_todo("B")).await.unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(repo.find_all().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_存在しないidの削除はエラーにならない() {
        let repo = MockTodoRepository::new();

        let result = repo.delete_by_id(&TodoId::new()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_fail_with_unexpected設定後はエラーを返す() {
        let repo = MockTodoRepository::new();
        repo.fail_with_unexpected("DB 停止中");

        let result = repo.find_all().await;

        assert!(result.is_err());
    }
}
