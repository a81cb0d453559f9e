//! # Todo Service 共有ユーティリティ
//!
//! ワークスペースの各クレートから使う、ビジネスロジックを含まない部品。
//! axum には依存しない（HTTP レスポンスへの変換はサービスの責務）。
//!
//! - [`error_response`] - RFC 9457 形式のエラーボディ
//! - [`observability`] - トレーシング初期化（`observability` feature）

pub mod error_response;
pub mod observability;

pub use error_response::ErrorResponse;
