//! # Todo ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /todos` - ローカルの Todo と Placeholder API の要素を連結した一覧
//! - `GET /todos/{id}` - Todo 取得
//! - `POST /todos` - Todo 作成
//! - `DELETE /todos/{id}` - Todo 削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path,
        State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use todo_domain::todo::{Todo, TodoDescription, TodoId};
use uuid::Uuid;

use crate::{
    client::RemoteItem,
    error::ApiError,
    usecase::{TodoEntry, TodoUseCaseImpl},
};

/// Todo API の共有状態
pub struct TodoState {
    pub usecase: TodoUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// Todo 作成リクエスト
///
/// `description` の欠落を 400 として扱うため `Option` で受ける。
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub description: Option<String>,
}

/// Todo DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TodoDto {
    pub id:          Uuid,
    pub description: String,
}

impl From<&Todo> for TodoDto {
    fn from(todo: &Todo) -> Self {
        Self {
            id:          *todo.id().as_uuid(),
            description: todo.description().as_str().to_string(),
        }
    }
}

/// 一覧の要素 DTO
///
/// ローカル分は `{id, description}`、リモート分は受信した JSON をそのまま出力する。
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TodoListItemDto {
    Local(TodoDto),
    Remote(RemoteItem),
}

impl From<TodoEntry> for TodoListItemDto {
    fn from(entry: TodoEntry) -> Self {
        match entry {
            TodoEntry::Local(todo) => TodoListItemDto::Local(TodoDto::from(&todo)),
            TodoEntry::Remote(item) => TodoListItemDto::Remote(item),
        }
    }
}

// --- 入力検証 ---

/// パスパラメータを TodoId に変換する
///
/// UUID として解釈できない場合は `Validation` を返す。
pub fn parse_todo_id(path: Result<Path<Uuid>, PathRejection>) -> Result<TodoId, ApiError> {
    let Path(id) = path.map_err(|rejection| {
        ApiError::Validation(format!("不正な Todo ID です: {}", rejection.body_text()))
    })?;
    Ok(TodoId::from_uuid(id))
}

/// 作成リクエストを検証し、TodoDescription を返す
///
/// JSON として不正、`description` の欠落、文字数範囲外はいずれも `Validation` を返す。
pub fn validate_create_request(
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<TodoDescription, ApiError> {
    let Json(req) = body.map_err(|rejection| {
        ApiError::Validation(format!("リクエストボディが不正です: {}", rejection.body_text()))
    })?;
    let description = req
        .description
        .ok_or_else(|| ApiError::Validation("description は必須です".to_string()))?;
    Ok(TodoDescription::new(description)?)
}

// --- ハンドラ ---

/// GET /todos/{id}
///
/// ## レスポンス
///
/// - `200 OK`: Todo
/// - `400 Bad Request`: ID が UUID でない
/// - `404 Not Found`: Todo が存在しない
#[tracing::instrument(skip_all)]
pub async fn get_todo(
    State(state): State<Arc<TodoState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_todo_id(path)?;

    let todo = state.usecase.find_by_id(&id).await?;

    Ok((StatusCode::OK, Json(TodoDto::from(&todo))))
}

/// GET /todos
///
/// ## レスポンス
///
/// - `200 OK`: ローカル分の後にリモート分を連結した配列
/// - `500 Internal Server Error`: データベースエラー
/// - `502 Bad Gateway`: Placeholder API の呼び出し失敗
#[tracing::instrument(skip_all)]
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.usecase.find_all().await?;

    let items: Vec<TodoListItemDto> = entries.into_iter().map(TodoListItemDto::from).collect();

    Ok((StatusCode::OK, Json(items)))
}

/// POST /todos
///
/// ## レスポンス
///
/// - `201 Created`: 作成された Todo
/// - `400 Bad Request`: JSON 不正、`description` 欠落、文字数範囲外
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let description = validate_create_request(body)?;

    let todo = state.usecase.create(description).await?;

    Ok((StatusCode::CREATED, Json(TodoDto::from(&todo))))
}

/// DELETE /todos/{id}
///
/// ## レスポンス
///
/// - `204 No Content`: 削除成功（存在しない ID を含む）
/// - `400 Bad Request`: ID が UUID でない
#[tracing::instrument(skip_all)]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_todo_id(path)?;

    state.usecase.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
