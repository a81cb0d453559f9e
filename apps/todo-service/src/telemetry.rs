//! # リクエスト単位のテレメトリ
//!
//! - [`make_request_span`]: 受信ヘッダーの W3C Trace Context / Baggage を親にしたリクエストスパン
//! - [`record_http_metrics`]: ルートごとのリクエスト数と処理時間
//!
//! OTLP 送信が無効な場合、メトリクスは no-op の Meter に記録される。

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{self, HeaderMap},
    middleware::Next,
    response::Response,
};
use opentelemetry::{
    Context,
    KeyValue,
    metrics::{Counter, Histogram, Meter},
    propagation::{Extractor, TextMapPropagator},
    trace::{TraceContextExt, TraceId},
};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(http::HeaderName::as_str).collect()
    }
}

/// リクエストヘッダーから呼び出し元のトレースコンテキストを取り出す
///
/// 有効な `traceparent` がなければ、空のスパンコンテキストを持つ Context を返す。
pub fn extract_remote_context(propagator: &dyn TextMapPropagator, headers: &HeaderMap) -> Context {
    propagator.extract(&HeaderExtractor(headers))
}

/// `TraceLayer::make_span_with` 用のリクエストスパン
///
/// 呼び出し元のコンテキストを親に設定し、トレース ID を `trace_id` フィールドに記録する。
pub fn make_request_span<B>(request: &http::Request<B>) -> Span {
    let parent = opentelemetry::global::get_text_map_propagator(|propagator| {
        extract_remote_context(propagator, request.headers())
    });
    let remote_trace_id = parent.span().span_context().trace_id();

    let span = tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        trace_id = tracing::field::Empty,
    );
    span.set_parent(parent);

    // OTLP 無効時は span.context() が空になるため、呼び出し元の ID を使う
    let own_trace_id = span.context().span().span_context().trace_id();
    let trace_id = if own_trace_id == TraceId::INVALID {
        remote_trace_id
    } else {
        own_trace_id
    };
    if trace_id != TraceId::INVALID {
        span.record("trace_id", tracing::field::display(trace_id));
    }

    span
}

/// HTTP サーバーメトリクス
#[derive(Clone)]
pub struct HttpMetrics {
    requests: Counter<u64>,
    duration: Histogram<f64>,
}

impl HttpMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            requests: meter
                .u64_counter("http.server.request.count")
                .with_description("処理したリクエスト数")
                .build(),
            duration: meter
                .f64_histogram("http.server.request.duration")
                .with_description("リクエストの処理時間")
                .with_unit("s")
                .build(),
        }
    }
}

/// リクエスト数と処理時間を記録するミドルウェア
///
/// `http.route` にはマッチしたルートのテンプレート（`/todos/{id}` など）を使う。
pub async fn record_http_metrics(
    State(metrics): State<HttpMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let route = request.extensions().get::<MatchedPath>().map_or_else(
        || request.uri().path().to_string(),
        |path| path.as_str().to_string(),
    );
    let started = Instant::now();

    let response = next.run(request).await;

    let attributes = [
        KeyValue::new("http.request.method", method),
        KeyValue::new("http.route", route),
        KeyValue::new(
            "http.response.status_code",
            i64::from(response.status().as_u16()),
        ),
    ];
    metrics.requests.add(1, &attributes);
    metrics
        .duration
        .record(started.elapsed().as_secs_f64(), &attributes);

    response
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use opentelemetry::baggage::BaggageExt;
    use pretty_assertions::assert_eq;
    use todo_shared::observability::text_map_propagator;

    use super::*;

    #[test]
    fn test_traceparentとbaggageから呼び出し元のコンテキストを復元する() {
        // Given
        let mut headers = HeaderMap::new();
        headers.insert(
            "traceparent",
            HeaderValue::from_static("00-4bf92f3577b34da6a3ce929b0e0e4736-00f067aa0ba902b7-01"),
        );
        headers.insert("baggage", HeaderValue::from_static("tenant=acme"));

        // When
        let cx = extract_remote_context(&text_map_propagator(), &headers);

        // Then
        let span_context = cx.span().span_context().clone();
        assert!(span_context.is_remote());
        assert!(span_context.is_sampled());
        assert_eq!(
            span_context.trace_id().to_string(),
            "4bf92f3577b34da6a3ce929b0e0e4736"
        );
        assert_eq!(span_context.span_id().to_string(), "00f067aa0ba902b7");
        assert_eq!(
            cx.baggage().get("tenant").map(ToString::to_string),
            Some("acme".to_string())
        );
    }

    #[test]
    fn test_traceparentがなければ無効なコンテキストを返す() {
        let cx = extract_remote_context(&text_map_propagator(), &HeaderMap::new());

        assert!(!cx.span().span_context().is_valid());
    }

    #[test]
    fn test_不正なtraceparentは無視する() {
        let mut headers = HeaderMap::new();
        headers.insert("traceparent", HeaderValue::from_static("not-a-traceparent"));

        let cx = extract_remote_context(&text_map_propagator(), &headers);

        assert!(!cx.span().span_context().is_valid());
    }
}
