use crate::utils::request_id::RequestIdExt;
use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{info, warn};

/// Structured request/response logging.
///
/// Reads the request id set by the request id middleware, so that layer must
/// wrap this one.
pub async fn request_response_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let request_id = req.extensions().request_id();

    // Only present when served with connect info; absent under tests
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|connect_info| connect_info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    info!(
        method = %method,
        path = %path,
        ip = %ip,
        request_id = %request_id,
        "API request"
    );

    let start = Instant::now();
    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status,
            latency_ms = %latency_ms,
            request_id = %request_id,
            "API response"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status,
            latency_ms = %latency_ms,
            request_id = %request_id,
            "API response"
        );
    }

    response
}
