use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::time::{Duration, Instant};
use tracing::info;

/// Install the Prometheus recorder and start its HTTP listener on `port`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics_with_port(port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .add_global_label("service", "climate_api")
        .install()?;

    info!("Metrics server started on :{}/metrics", port);
    Ok(())
}

/// Middleware to collect HTTP request metrics
pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    // Matched route template, so path parameters don't explode label cardinality
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    let labels = [
        ("method", method.as_str().to_string()),
        ("path", path),
        ("status", status.as_str().to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    gauge!("http_requests_active").decrement(1.0);

    if status.is_server_error() {
        counter!("http_errors_total", &labels[..2]).increment(1);
    }

    response
}

/// Track a climate query operation
pub fn track_query(operation: &'static str, duration: Duration, success: bool) {
    let result = if success { "success" } else { "failure" };

    counter!("climate_queries_total", "operation" => operation, "result" => result).increment(1);
    histogram!("climate_query_duration_seconds", "operation" => operation)
        .record(duration.as_secs_f64());
}
