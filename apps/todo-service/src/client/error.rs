//! Placeholder API クライアントのエラー型

use thiserror::Error;

/// Placeholder API クライアントエラー
#[derive(Debug, Clone, Error)]
pub enum PlaceholderClientError {
    /// ネットワークエラー（接続失敗、タイムアウト、ボディ読み込み失敗）
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 2xx 以外のステータス
    #[error("予期しないステータス {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// レスポンスボディが JSON 配列として解釈できない
    #[error("レスポンスのデシリアライズに失敗しました: {0}")]
    Deserialization(String),
}

impl From<reqwest::Error> for PlaceholderClientError {
    fn from(err: reqwest::Error) -> Self {
        PlaceholderClientError::Network(err.to_string())
    }
}
