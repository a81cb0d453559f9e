//! # トレーシング初期化
//!
//! - `LOG_FORMAT` で出力形式（`json` / `pretty`）、`RUST_LOG` でフィルタを切り替える
//! - OTLP エンドポイントが設定されていれば、トレースとメトリクスを OpenTelemetry Collector に送信する
//! - 受信リクエストの `traceparent` / `baggage` ヘッダーを読むため、W3C の伝搬形式を登録する

use std::str::FromStr;

const DEFAULT_FILTER: &str = "info,todo=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 イベント 1 行の JSON（ログ基盤への転送向け）
    Json,
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(other.to_string()),
        }
    }
}

impl LogFormat {
    /// `LOG_FORMAT` から読み取る
    ///
    /// 未設定なら `Pretty`。不明な値も `Pretty` とし、subscriber 初期化前のため stderr に警告する。
    pub fn from_env() -> Self {
        let Ok(raw) = std::env::var("LOG_FORMAT") else {
            return Self::default();
        };
        raw.parse().unwrap_or_else(|unknown| {
            eprintln!("WARNING: LOG_FORMAT={unknown:?} は不明な値のため pretty で出力します");
            Self::Pretty
        })
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub service_name:   String,
    pub log_format:     LogFormat,
    /// `RUST_LOG` 未設定時のフィルタ
    pub default_filter: String,
    /// OTLP gRPC エンドポイント。`None` なら OpenTelemetry への送信を行わない
    pub otlp_endpoint:  Option<String>,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            default_filter: DEFAULT_FILTER.to_string(),
            otlp_endpoint: None,
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }

    pub fn with_otlp_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.otlp_endpoint = endpoint;
        self
    }
}

/// OpenTelemetry の初期化エラー
#[cfg(feature = "observability")]
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("OTLP エクスポーターの初期化に失敗しました: {0}")]
    Exporter(String),
}

/// W3C Trace Context と Baggage を扱う伝搬形式
#[cfg(feature = "observability")]
pub fn text_map_propagator() -> opentelemetry::propagation::TextMapCompositePropagator {
    use opentelemetry_sdk::propagation::{BaggagePropagator, TraceContextPropagator};

    opentelemetry::propagation::TextMapCompositePropagator::new(vec![
        Box::new(TraceContextPropagator::new()),
        Box::new(BaggagePropagator::new()),
    ])
}

/// OpenTelemetry のプロバイダを保持する
///
/// 終了時に [`shutdown`](TelemetryGuard::shutdown) を呼び、バッファ済みのスパンとメトリクスを送信する。
#[cfg(feature = "observability")]
#[derive(Default)]
pub struct TelemetryGuard {
    tracer_provider: Option<opentelemetry_sdk::trace::TracerProvider>,
    meter_provider:  Option<opentelemetry_sdk::metrics::SdkMeterProvider>,
}

#[cfg(feature = "observability")]
impl TelemetryGuard {
    /// OTLP エクスポーターを作成し、グローバルプロバイダとして登録する
    fn install(service_name: &str, endpoint: &str) -> Result<Self, TelemetryError> {
        use opentelemetry::{KeyValue, global};
        use opentelemetry_otlp::WithExportConfig;
        use opentelemetry_sdk::{
            Resource,
            metrics::{PeriodicReader, SdkMeterProvider},
            runtime,
            trace::TracerProvider,
        };

        let resource = Resource::new([KeyValue::new("service.name", service_name.to_string())]);

        let span_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()
            .map_err(|e| TelemetryError::Exporter(e.to_string()))?;
        let tracer_provider = TracerProvider::builder()
            .with_batch_exporter(span_exporter, runtime::Tokio)
            .with_resource(resource.clone())
            .build();

        let metric_exporter = opentelemetry_otlp::MetricExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()
            .map_err(|e| TelemetryError::Exporter(e.to_string()))?;
        let meter_provider = SdkMeterProvider::builder()
            .with_reader(PeriodicReader::builder(metric_exporter, runtime::Tokio).build())
            .with_resource(resource)
            .build();

        global::set_tracer_provider(tracer_provider.clone());
        global::set_meter_provider(meter_provider.clone());

        Ok(Self {
            tracer_provider: Some(tracer_provider),
            meter_provider:  Some(meter_provider),
        })
    }

    /// 未送信のスパンとメトリクスを送信してプロバイダを停止する
    pub fn shutdown(self) {
        if let Some(provider) = self.tracer_provider
            && let Err(e) = provider.shutdown()
        {
            tracing::warn!("TracerProvider の停止に失敗しました: {}", e);
        }
        if let Some(provider) = self.meter_provider
            && let Err(e) = provider.shutdown()
        {
            tracing::warn!("MeterProvider の停止に失敗しました: {}", e);
        }
    }
}

/// グローバル subscriber を登録する
///
/// - `ErrorLayer`: `InfraError` の SpanTrace に呼び出し経路を記録する
/// - `otlp_endpoint` がある場合のみ `tracing-opentelemetry` レイヤーを追加する
///
/// 伝搬形式は OTLP 送信の有無にかかわらず登録する。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) -> Result<TelemetryGuard, TelemetryError> {
    use opentelemetry::trace::TracerProvider as _;
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    let guard = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => TelemetryGuard::install(&config.service_name, endpoint)?,
        None => TelemetryGuard::default(),
    };
    let otel_layer = guard.tracer_provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(config.service_name.clone()))
    });

    opentelemetry::global::set_text_map_propagator(text_map_propagator());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .with(otel_layer)
        .init();

    tracing::info!(
        service = %config.service_name,
        format = ?config.log_format,
        otlp_endpoint = config.otlp_endpoint.as_deref().unwrap_or("(無効)"),
        "トレーシングを初期化しました"
    );

    Ok(guard)
}
