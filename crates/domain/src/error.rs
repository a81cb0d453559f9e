//! # ドメインエラー
//!
//! `Validation` は入力境界で、`NotFound` はユースケースで発生する。
//! HTTP ステータスへの対応付けはサービス側の `ApiError` が行う。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// 値オブジェクトの制約違反（空の説明、文字数超過など）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        entity_type: &'static str,
        id:          String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_foundのメッセージにエンティティ種別とidが含まれる() {
        let err = DomainError::NotFound {
            entity_type: "Todo",
            id:          "abc".to_string(),
        };

        assert_eq!(err.to_string(), "Todo が見つかりません: abc");
    }
}
