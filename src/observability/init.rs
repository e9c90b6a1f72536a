//! Tracing subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when `trace_level` is unset or not a valid filter.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Name of the trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "shopsearch-otlp.json";

/// Builds the span filter from the configured level.
#[must_use]
pub fn filter_for(config: &Config) -> EnvFilter {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL))
}

/// Installs the global subscriber exporting spans to
/// `~/.local/share/zellij/shopsearch/shopsearch-otlp.json`.
///
/// Tracing is optional: if the data directory cannot be created the plugin
/// runs without a subscriber. Only the first call has any effect.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", "shopsearch"),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let tracer = provider.tracer(exporter::SCOPE_NAME);

    let _ = tracing_subscriber::registry()
        .with(filter_for(config))
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
