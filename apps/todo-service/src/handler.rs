//! # HTTP ハンドラ
//!
//! - `health`: ヘルスチェック
//! - `todo`: Todo の CRUD と一覧

pub mod health;
pub mod todo;

pub use health::health_check;
pub use todo::{TodoState, create_todo, delete_todo, get_todo, list_todos};
