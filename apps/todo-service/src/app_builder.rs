//! # ルーター構築
//!
//! main と API テストで同じルーティングを共有する。

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    handler::{TodoState, create_todo, delete_todo, get_todo, health_check, list_todos},
    telemetry::{HttpMetrics, make_request_span, record_http_metrics},
};

/// Todo Service のルーターを構築する
///
/// メトリクスはグローバル Meter に記録する（OTLP 無効時は no-op）。
pub fn build_app(todo_state: Arc<TodoState>) -> Router {
    let metrics = HttpMetrics::new(&opentelemetry::global::meter("todo-service"));

    Router::new()
        .route("/health", get(health_check))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).delete(delete_todo))
        .route_layer(middleware::from_fn_with_state(metrics, record_http_metrics))
        .with_state(todo_state)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}
