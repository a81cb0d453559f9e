//! # Todo Service 設定
//!
//! 環境変数から Todo Service サーバーの設定を読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `TODO_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `TODO_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `PLACEHOLDER_BASE_URL` | No | Placeholder API のベース URL |
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | No | OTLP gRPC エンドポイント（未設定なら送信しない） |

use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PLACEHOLDER_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// ポート番号として解釈できない
    #[error("TODO_PORT は有効なポート番号である必要があります: {0}")]
    InvalidPort(String),
}

/// Todo Service サーバーの設定
#[derive(Debug, Clone)]
pub struct TodoServiceConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
    /// Placeholder API のベース URL
    pub placeholder_base_url: String,
    /// OTLP gRPC エンドポイント（スキーム付き）
    pub otlp_endpoint: Option<String>,
}

impl TodoServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("TODO_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("TODO_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            placeholder_base_url: lookup("PLACEHOLDER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER_BASE_URL.to_string()),
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
                .as_deref()
                .and_then(normalize_otlp_endpoint),
        })
    }
}

/// `collector:4317` のようにスキームがなければ `http://` を補う。空文字列は未設定扱い
fn normalize_otlp_endpoint(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains("://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("http://{trimmed}"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_必須項目のみでデフォルト値が補われる() {
        let config =
            TodoServiceConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db")]))
                .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "postgres://db");
        assert_eq!(
            config.placeholder_base_url,
            "https://jsonplaceholder.typicode.com"
        );
        assert_eq!(config.otlp_endpoint, None);
    }

    #[test]
    fn test_全項目を環境変数から読み込む() {
        let config = TodoServiceConfig::from_lookup(lookup_from(&[
            ("TODO_HOST", "127.0.0.1"),
            ("TODO_PORT", "3000"),
            ("DATABASE_URL", "postgres://db"),
            ("PLACEHOLDER_BASE_URL", "http://localhost:9999"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://otel-collector:4317"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.placeholder_base_url, "http://localhost:9999");
        assert_eq!(
            config.otlp_endpoint.as_deref(),
            Some("http://otel-collector:4317")
        );
    }

    #[test]
    fn test_スキームのないotlpエンドポイントにhttpを補う() {
        let config = TodoServiceConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "localhost:4317"),
        ]))
        .unwrap();

        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
    }

    #[test]
    fn test_空のotlpエンドポイントは未設定として扱う() {
        let config = TodoServiceConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "  "),
        ]))
        .unwrap();

        assert_eq!(config.otlp_endpoint, None);
    }

    #[test]
    fn test_database_url未設定でmissingを返す() {
        let result = TodoServiceConfig::from_lookup(lookup_from(&[]));

        assert!(matches!(result, Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn test_不正なポート番号でinvalid_portを返す() {
        let result = TodoServiceConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("TODO_PORT", "not-a-port"),
        ]));

        assert!(matches!(result, Err(ConfigError::InvalidPort(raw)) if raw == "not-a-port"));
    }
}
