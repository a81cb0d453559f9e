//! # Todo ドメイン層
//!
//! Todo の値オブジェクト・エンティティとドメインエラーを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! todo-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部 API）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`todo`] - Todo エンティティと値オブジェクト
//!
//! ## 使用例
//!
//! ```rust
//! use todo_domain::todo::{NewTodo, TodoDescription};
//!
//! let description = TodoDescription::new("牛乳を買う").unwrap();
//! let new_todo = NewTodo::new(description);
//! assert_eq!(new_todo.description().as_str(), "牛乳を買う");
//! ```

pub mod error;
pub mod todo;

pub use error::DomainError;
