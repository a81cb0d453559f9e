//! # インフラ層エラー定義
//!
//! [`InfraError`] はエラー種別（[`InfraErrorKind`]）と、生成時点の [`SpanTrace`] を持つ。
//! `tracing_error::ErrorLayer` が登録されていれば、どのリポジトリ操作の中で
//! 失敗したかをログから辿れる。

use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// 種別ごとの分岐には [`kind()`](InfraError::kind) を使用する。
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct InfraError {
    #[source]
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// クエリ実行・接続の失敗
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// マイグレーションの適用失敗
    #[error("マイグレーションエラー: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),

    /// 保存済みの値がドメインの制約を満たさないなど
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    fn new(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::new(InfraErrorKind::Unexpected(msg.into()))
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self::new(InfraErrorKind::Database(source))
    }
}

impl From<sqlx::migrate::MigrateError> for InfraError {
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        Self::new(InfraErrorKind::Migration(source))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    #[test]
    fn test_sqlxエラーからの変換でスパンが記録される() {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());

        let (err, trace) = tracing::subscriber::with_default(subscriber, || {
            let _enter = tracing::info_span!("find_todo").entered();
            let err = InfraError::from(sqlx::Error::RowNotFound);
            let trace = err.span_trace().to_string();
            (err, trace)
        });

        assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
        assert!(trace.contains("find_todo"), "SpanTrace: {trace}");
    }

    #[test]
    fn test_unexpectedの表示は種別のメッセージになる() {
        let err = InfraError::unexpected("description が空の行");

        assert_eq!(err.to_string(), "予期しないエラー: description が空の行");
    }

    #[test]
    fn test_sourceで種別をたどれる() {
        let err: InfraError = sqlx::Error::PoolTimedOut.into();

        let source = err.source().map(ToString::to_string).unwrap_or_default();

        assert!(source.starts_with("データベースエラー: "), "source: {source}");
    }
}
