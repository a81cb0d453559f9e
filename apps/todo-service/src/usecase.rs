//! # ユースケース層
//!
//! Todo Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリ・外部クライアントを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは入力検証と HTTP 変換のみを行い、ロジックはユースケースに集約

pub mod todo;

pub use todo::{TodoEntry, TodoUseCaseImpl};
