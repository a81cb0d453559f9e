//! テスト用のスタブ

use async_trait::async_trait;

use crate::client::{PlaceholderClient, PlaceholderClientError, RemoteItem};

/// 固定の結果を返す PlaceholderClient
#[derive(Clone)]
pub struct StubPlaceholderClient {
    result: Result<Vec<RemoteItem>, PlaceholderClientError>,
}

impl StubPlaceholderClient {
    pub fn returning(items: Vec<RemoteItem>) -> Self {
        Self { result: Ok(items) }
    }

    pub fn empty() -> Self {
        Self::returning(Vec::new())
    }

    pub fn failing(err: PlaceholderClientError) -> Self {
        Self { result: Err(err) }
    }
}

/// JSON 文字列から RemoteItem を作る
pub fn remote_item(json: &str) -> RemoteItem {
    RemoteItem::new(serde_json::value::RawValue::from_string(json.to_string()).unwrap())
}

#[async_trait]
impl PlaceholderClient for StubPlaceholderClient {
    async fn request_all(&self) -> Result<Vec<RemoteItem>, PlaceholderClientError> {
        self.result.clone()
    }
}
