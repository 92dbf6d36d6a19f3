//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define page serving metrics (requests, latency, failures, builds)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `pages_requests_total` (counter): requests by method, status, page
//! - `pages_request_duration_seconds` (histogram): latency distribution
//! - `pages_render_failures_total` (counter): failed renders by page, kind
//! - `pages_built_total` (counter): pages written by the static build
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - The page label is the identifier, never the raw path, so dynamic
//!   routes share one series

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::render::PipelineError;

/// Install the Prometheus exporter, listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a served request.
pub fn record_request(method: &str, status: u16, page: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("page", page.to_string()),
    ];
    counter!("pages_requests_total", &labels).increment(1);
    histogram!("pages_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

/// Record a render that failed after the page was loaded.
pub fn record_render_failure(page: &str, error: &PipelineError) {
    let kind = match error {
        PipelineError::DataFetch { .. } => "data_fetch",
        PipelineError::Render { .. } => "render",
        PipelineError::NoExchange(_) => "no_exchange",
    };
    counter!(
        "pages_render_failures_total",
        "page" => page.to_string(),
        "kind" => kind
    )
    .increment(1);
}

/// Record a page written by the static build.
pub fn record_page_built(page: &str) {
    counter!("pages_built_total", "page" => page.to_string()).increment(1);
}
