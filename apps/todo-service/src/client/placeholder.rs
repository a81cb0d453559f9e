//! Placeholder API クライアントの実装

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::error::PlaceholderClientError;

/// Placeholder API から取得した要素
///
/// 受信した JSON をバイト列のまま保持し、再シリアライズ時もそのまま出力する。
/// キー順や数値表現は変わらない。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteItem(Box<RawValue>);

impl RemoteItem {
    pub fn new(raw: Box<RawValue>) -> Self {
        Self(raw)
    }
}

impl PartialEq for RemoteItem {
    fn eq(&self, other: &Self) -> bool {
        self.0.get() == other.0.get()
    }
}

/// Placeholder API クライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義する。
#[async_trait]
pub trait PlaceholderClient: Send + Sync {
    /// `GET {base_url}/todos` を呼び出し、要素を受信順のまま返す
    async fn request_all(&self) -> Result<Vec<RemoteItem>, PlaceholderClientError>;
}

/// reqwest による Placeholder API クライアント
#[derive(Clone)]
pub struct PlaceholderClientImpl {
    base_url: String,
    client:   reqwest::Client,
}

impl PlaceholderClientImpl {
    /// 新しいクライアントを作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: Placeholder API のベース URL（例: `https://jsonplaceholder.typicode.com`）
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client:   reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PlaceholderClient for PlaceholderClientImpl {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn request_all(&self) -> Result<Vec<RemoteItem>, PlaceholderClientError> {
        let url = format!("{}/todos", self.base_url);

        let response = self.client.get(&url).send().await?;
        handle_response(response).await
    }
}

/// レスポンスの共通ハンドリング
///
/// 2xx 以外は `UnexpectedStatus`、ボディが JSON 配列でなければ `Deserialization` を返す。
async fn handle_response(
    response: reqwest::Response,
) -> Result<Vec<RemoteItem>, PlaceholderClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(PlaceholderClientError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        });
    }

    let items = serde_json::from_str::<Vec<RemoteItem>>(&body)
        .map_err(|e| PlaceholderClientError::Deserialization(e.to_string()))?;
    tracing::debug!(count = items.len(), "Placeholder API から取得");

    Ok(items)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils::remote_item;

    /// テスト用の HTTP レスポンスを構築する
    fn make_response(status: u16, body: &str) -> reqwest::Response {
        let http_resp = http::Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body.to_string())
            .unwrap();
        reqwest::Response::from(http_resp)
    }

    #[tokio::test]
    async fn test_成功レスポンスを受信順のまま返す() {
        let response = make_response(
            200,
            r#"[{"userId":1,"id":1,"title":"a","completed":false},{"id":2}]"#,
        );

        let items = handle_response(response).await.unwrap();

        assert_eq!(
            items,
            vec![
                remote_item(r#"{"userId":1,"id":1,"title":"a","completed":false}"#),
                remote_item(r#"{"id":2}"#),
            ]
        );
    }

    #[tokio::test]
    async fn test_キー順と桁数の大きい数値を変えずに再出力する() {
        let body = r#"[{"userId":1,"title":"t","id":12345678901234567890123,"completed":false}]"#;
        let response = make_response(200, body);

        let items = handle_response(response).await.unwrap();

        assert_eq!(serde_json::to_string(&items).unwrap(), body);
    }

    #[tokio::test]
    async fn test_空配列は空のvecを返す() {
        let response = make_response(200, "[]");

        let items = handle_response(response).await.unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_2xx以外はunexpected_statusを返す() {
        let response = make_response(503, "unavailable");

        let result = handle_response(response).await;

        assert!(matches!(
            result,
            Err(PlaceholderClientError::UnexpectedStatus { status: 503, body }) if body == "unavailable"
        ));
    }

    #[tokio::test]
    async fn test_配列でないボディはdeserializationを返す() {
        let response = make_response(200, r#"{"id": 1}"#);

        let result = handle_response(response).await;

        assert!(matches!(
            result,
            Err(PlaceholderClientError::Deserialization(_))
        ));
    }

    #[test]
    fn test_ベースurlの末尾スラッシュを除去する() {
        let client = PlaceholderClientImpl::new("http://localhost:9999/");

        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
