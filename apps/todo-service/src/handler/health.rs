//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health
//! → 200 {"status": "healthy", "version": "0.1.0"}
//! ```

use axum::Json;
use serde::Serialize;

/// ヘルスチェックレスポンス
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status:  &'static str,
    /// Cargo.toml のバージョン
    pub version: &'static str,
}

/// DB・外部 API には問い合わせず、プロセスが応答できることだけを返す
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
