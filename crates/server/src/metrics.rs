//! Prometheus metrics
//!
//! Counters and histograms are recorded through the `metrics` facade. Until
//! [`init_metrics`] installs the Prometheus recorder every call is a no-op,
//! which is what tests rely on.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

use crate::state::AppState;
use crate::ServerError;

/// Install the global Prometheus recorder
pub fn init_metrics() -> Result<PrometheusHandle, ServerError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics(e.to_string()))
}

/// Count a handled request
pub fn record_request(endpoint: &'static str, status: StatusCode) {
    metrics::counter!(
        "chatbot_requests_total",
        "endpoint" => endpoint,
        "status" => status.as_u16().to_string()
    )
    .increment(1);
}

/// Count a chat reply by outcome (`matched` / `fallback`)
pub fn record_reply(outcome: &'static str) {
    metrics::counter!("chatbot_replies_total", "outcome" => outcome).increment(1);
}

/// Count a failed request
pub fn record_error(kind: &'static str) {
    metrics::counter!("chatbot_errors_total", "kind" => kind).increment(1);
}

/// Time spent resolving a client record
pub fn record_config_load(elapsed: Duration) {
    metrics::histogram!("chatbot_config_load_seconds").record(elapsed.as_secs_f64());
}

/// `GET /metrics` in Prometheus text format
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = state
        .metrics
        .as_ref()
        .map(PrometheusHandle::render)
        .unwrap_or_default();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
