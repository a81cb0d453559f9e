//! # Todo Service エラー定義
//!
//! Todo Service 固有のエラーと、HTTP レスポンスへの変換を定義する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_domain::DomainError;
use todo_infra::InfraError;
use todo_shared::ErrorResponse;

use crate::client::PlaceholderClientError;

/// Todo Service で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 入力値が不正
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// Placeholder API の呼び出し失敗
    #[error("外部 API エラー: {0}")]
    Remote(#[from] PlaceholderClientError),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ApiError::Validation(msg),
            not_found @ DomainError::NotFound { .. } => ApiError::NotFound(not_found.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::Validation(msg) => ErrorResponse::validation_error(msg.clone()),
            ApiError::NotFound(msg) => ErrorResponse::not_found(msg.clone()),
            ApiError::Remote(e) => {
                tracing::error!("外部 API エラー: {}", e);
                ErrorResponse::bad_gateway("外部 API の呼び出しに失敗しました")
            }
            ApiError::Database(e) => {
                tracing::error!(
                    error.kind = "database",
                    span_trace = %e.span_trace(),
                    "データベースエラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
