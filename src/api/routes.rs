//! API route configuration.

use crate::api::handlers::{
    check_code_handler, health_handler, recent_handler, shorten_handler, stats_handler,
    url_info_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`            - Create a short link
/// - `GET  /url/{code}`         - Link summary, no visit counted
/// - `GET  /stats/{code}`       - Full record, visible until swept
/// - `GET  /recent`             - Newest unexpired links
/// - `GET  /check-code/{code}`  - Custom code availability
/// - `GET  /health`             - Health check
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/url/{code}", get(url_info_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/recent", get(recent_handler))
        .route("/check-code/{code}", get(check_code_handler))
        .route("/health", get(health_handler))
}
