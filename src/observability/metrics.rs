//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by operation, mode, status
//! - `gateway_request_duration_seconds` (histogram): handler latency
//! - `gateway_upstream_requests_total` (counter): provider calls by endpoint, outcome
//! - `gateway_upstream_duration_seconds` (histogram): provider latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled gateway request.
pub fn record_request(operation: &'static str, mode: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "operation" => operation,
        "mode" => mode,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "gateway_request_duration_seconds",
        "operation" => operation,
        "mode" => mode
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one provider call.
pub fn record_upstream(endpoint: &'static str, outcome: String, start: Instant) {
    metrics::counter!(
        "gateway_upstream_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("gateway_upstream_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}
