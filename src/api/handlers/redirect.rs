//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Every request for an existing code counts as a visit, including requests
/// that end up answered with 410 because the link has expired.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the link has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&code).await?;

    let location = HeaderValue::from_str(&link.original_url).map_err(|e| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "code": code, "reason": e.to_string() }),
        )
    })?;

    debug!(code = %code, visits = link.visits, "Redirecting");
    metrics::counter!("link_redirects_total").increment(1);

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
