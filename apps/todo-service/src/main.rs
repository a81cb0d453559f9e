//! # Todo Service サーバー
//!
//! Todo の CRUD API を提供する。一覧取得時は Placeholder API の要素を連結して返す。
//!
//! ```text
//! ┌──────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Client  │────▶│ Todo Service │────▶│  PostgreSQL  │
//! └──────────┘     └──────────────┘     └──────────────┘
//!                         │
//!                         ▼
//!                  ┌──────────────────┐
//!                  │ Placeholder API  │
//!                  └──────────────────┘
//! ```
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! DATABASE_URL=postgres://localhost/todo cargo run -p todo-service
//!
//! # JSON ログで起動
//! LOG_FORMAT=json TODO_PORT=3000 DATABASE_URL=postgres://... cargo run -p todo-service --release
//!
//! # トレースとメトリクスを OpenTelemetry Collector に送信
//! OTEL_EXPORTER_OTLP_ENDPOINT=http://localhost:4317 DATABASE_URL=postgres://... cargo run -p todo-service
//! ```
//!
//! SIGINT / SIGTERM を受けると処理中のリクエストを待って停止し、未送信のスパンとメトリクスを送り出す。
//!
//! 環境変数の一覧は [`todo_service::config`] を参照。

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use todo_infra::{db, repository::PostgresTodoRepository};
use todo_service::{
    app_builder::build_app,
    client::PlaceholderClientImpl,
    config::TodoServiceConfig,
    handler::TodoState,
    usecase::TodoUseCaseImpl,
};
use todo_shared::observability::{TracingConfig, init_tracing};

/// Todo Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // 設定読み込み（OTLP エンドポイントをトレーシング初期化に渡すため先に読む）
    let config = TodoServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

    // トレーシング初期化
    let tracing_config =
        TracingConfig::from_env("todo-service").with_otlp_endpoint(config.otlp_endpoint.clone());
    let telemetry = init_tracing(tracing_config).context("トレーシングの初期化に失敗しました")?;
    let tracing_guard = tracing::info_span!("app", service = "todo-service").entered();

    tracing::info!(
        "Todo Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    db::run_migrations(&pool)
        .await
        .context("マイグレーションに失敗しました")?;
    tracing::info!("データベースに接続しました");

    // 依存コンポーネントを初期化
    let todo_repository = Arc::new(PostgresTodoRepository::new(pool));
    let placeholder_client = Arc::new(PlaceholderClientImpl::new(&config.placeholder_base_url));
    let todo_state = Arc::new(TodoState {
        usecase: TodoUseCaseImpl::new(todo_repository, placeholder_client),
    });

    let app = build_app(todo_state);

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Todo Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Todo Service サーバーを停止しました");
    drop(tracing_guard);
    telemetry.shutdown();

    Ok(())
}

/// SIGINT（Ctrl+C）または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Ctrl+C ハンドラの登録に失敗しました: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラの登録に失敗しました: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
