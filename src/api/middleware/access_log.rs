//! One log line per request.

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};

/// Logs method, path, query string, status and latency of every request.
///
/// The peer address is included when the server was started with connect
/// info; routers built for tests run without it.
///
/// ```text
/// INFO 127.0.0.1 "GET /api/recent" 200 3ms
/// INFO - "POST /api/shorten?src=cli" 400 1ms
/// ```
pub async fn access_log_mw(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = req.method().clone();
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    tracing::info!(
        r#"{ip} "{method} {target}" {status} {ms}ms"#,
        status = response.status().as_u16(),
        ms = start.elapsed().as_millis(),
    );

    response
}
