//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! 全エンドポイント共通のエラーボディ。axum への変換はサービス側で行う。

use serde::{Deserialize, Serialize};

const PROBLEM_TYPE_BASE: &str = "https://todo-service.example.com/errors";

/// エラーレスポンス
///
/// `type` は問題の種類を識別する URI。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

impl ErrorResponse {
    fn problem(slug: &str, title: &str, status: u16, detail: impl Into<String>) -> Self {
        Self {
            error_type: format!("{PROBLEM_TYPE_BASE}/{slug}"),
            title: title.to_string(),
            status,
            detail: detail.into(),
        }
    }

    /// 400: 入力値の検証失敗
    pub fn validation_error(detail: impl Into<String>) -> Self {
        Self::problem("validation-error", "Validation Error", 400, detail)
    }

    /// 404
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::problem("not-found", "Not Found", 404, detail)
    }

    /// 500: detail は固定文言
    pub fn internal_error() -> Self {
        Self::problem(
            "internal-error",
            "Internal Server Error",
            500,
            "内部エラーが発生しました",
        )
    }

    /// 502: 上流 API の呼び出し失敗
    pub fn bad_gateway(detail: impl Into<String>) -> Self {
        Self::problem("bad-gateway", "Bad Gateway", 502, detail)
    }
}
