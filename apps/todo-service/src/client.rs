//! # 外部 API クライアント
//!
//! Placeholder API（JSONPlaceholder 互換）から Todo 一覧を取得する。

mod error;
mod placeholder;

pub use error::PlaceholderClientError;
pub use placeholder::{PlaceholderClient, PlaceholderClientImpl, RemoteItem};
