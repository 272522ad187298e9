//! Tracing and OpenTelemetry setup for the campus CLI
//!
//! Usage:
//!   campus serve                            # development: debug, targets shown
//!   ENVIRONMENT=production campus serve     # info, one JSON object per line
//!   campus --otel serve                     # also export spans over OTLP
//!   RUST_LOG=campus_api=trace campus serve  # fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                     # Log filter (overrides the mode default)
//!   OTEL_EXPORTER_OTLP_ENDPOINT  # OTLP endpoint (default: http://localhost:4317)
//!   OTEL_SERVICE_NAME            # Service name (default: campus-api)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub environment: Environment,
    /// Enable OpenTelemetry OTLP export
    pub otel: bool,
}

impl TracingConfig {
    fn default_level(&self) -> &'static str {
        if self.environment.is_production() {
            "info"
        } else {
            "debug"
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_level()))
    }
}

/// Initialize tracing with console output only (no OTEL)
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(config.filter());

    let result = if config.environment.is_production() {
        builder.json().with_ansi(false).try_init()
    } else {
        builder.with_target(true).compact().try_init()
    };

    result.map_err(|err| anyhow!(err))
}

/// Initialize tracing with OpenTelemetry OTLP export
#[cfg(feature = "telemetry")]
pub fn init_tracing_with_otel(config: &TracingConfig) -> Result<()> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::TracerProvider;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "campus-api".to_string());

    let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
        .map_err(|e| anyhow!("Failed to create OTLP exporter: {}", e))?;

    let resource = opentelemetry_sdk::Resource::new(vec![KeyValue::new(
        "service.name",
        service_name.clone(),
    )]);

    let provider = TracerProvider::builder()
        .with_batch_exporter(otlp_exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(resource)
        .build();

    let tracer = provider.tracer("campus");
    let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    // Dropping the provider stops export
    let _ = opentelemetry::global::set_tracer_provider(provider);

    let production = config.environment.is_production();
    let json_layer = production.then(|| tracing_subscriber::fmt::layer().json().with_ansi(false));
    let compact_layer =
        (!production).then(|| tracing_subscriber::fmt::layer().with_target(true).compact());

    tracing_subscriber::registry()
        .with(config.filter())
        .with(json_layer)
        .with(compact_layer)
        .with(telemetry_layer)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    tracing::info!(
        endpoint = %endpoint,
        service = %service_name,
        "OpenTelemetry tracing initialized"
    );

    Ok(())
}

/// Shutdown OpenTelemetry (flush pending spans)
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

/// No-op shutdown when telemetry is disabled
#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}

/// Initialize tracing based on configuration
///
/// Chooses between console-only and OTEL based on config.otel flag
pub fn init(config: &TracingConfig) -> Result<()> {
    #[cfg(feature = "telemetry")]
    if config.otel {
        return init_tracing_with_otel(config);
    }

    #[cfg(not(feature = "telemetry"))]
    if config.otel {
        eprintln!("warning: --otel ignored, built without the `telemetry` feature");
    }

    init_tracing(config)
}
