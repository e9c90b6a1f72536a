//! OpenTelemetry-based observability with file-based span export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → JsonFileExporter → rotating file
//! ```
//!
//! Spans land in `~/.local/share/zellij/shopsearch/shopsearch-otlp.json`, one
//! OTLP JSON document per line. The file rotates at 10 MB and keeps three
//! numbered backups. The level comes from the `trace_level` plugin option
//! (default `info`).
//!
//! Request spans and response spans run in different `update` calls; the API
//! layer carries the trace context through the HTTP request context so both
//! end up in the same trace.
//!
//! - [`init`]: subscriber setup
//! - [`exporter`]: span exporter and OTLP JSON encoding
//! - [`rotation`]: size-rotated file

pub mod exporter;
pub mod init;
pub mod rotation;

pub use init::init_tracing;
