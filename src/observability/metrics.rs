//! Metrics collection and exposition.
//!
//! # Metrics
//! - `minimvc_requests_total` (counter): dispatches by status
//! - `minimvc_request_duration_seconds` (histogram): dispatch latency
//! - `minimvc_routes` (gauge): compiled route count

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::dispatch::DispatchStatus;

/// Starts the Prometheus scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Records one finished dispatch.
pub fn record_request(method: &str, status: DispatchStatus, start: Instant) {
    let status = status.http_code().to_string();
    metrics::counter!(
        "minimvc_requests_total",
        "method" => method.to_string(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!("minimvc_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Publishes the size of the route table.
pub fn record_routes(count: usize) {
    metrics::gauge!("minimvc_routes").set(count as f64);
}
