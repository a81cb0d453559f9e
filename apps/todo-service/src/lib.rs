//! # Todo Service ライブラリ
//!
//! Todo の CRUD API と、外部 Placeholder API の結果を一覧にマージする処理を提供する。
//!
//! ## レイヤー構成
//!
//! ```text
//! handler（入力検証・HTTP 変換）
//!    ↓
//! usecase（ビジネスロジック: 一覧のマージ）
//!    ↓                    ↓
//! TodoRepository     PlaceholderClient
//! (todo-infra)       (client)
//! ```

pub mod app_builder;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod telemetry;
pub mod usecase;

// テストユーティリティ（内部実装、ドキュメントからは隠す）
#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;
