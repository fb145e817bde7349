//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::host_url::{host_url, short_url};

/// Creates a short link for a single URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "custom_code": "my-link",  // optional
///   "validity": 60             // optional, minutes, default 30
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "short_url": "http://localhost:5000/my-link",
///   "short_code": "my-link",
///   "expires_at": "2024-06-01T12:30:00Z",
///   "status": "created",
///   "is_custom": true
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON, the URL is missing or
/// invalid, the custom code is malformed, or the custom code is taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Request must be JSON",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;

    let base = host_url(&headers, state.base_url.as_deref())?;

    let link = state
        .link_service
        .shorten(
            payload.url.as_deref().unwrap_or_default(),
            payload.custom_code.as_deref(),
            payload.validity_minutes(),
        )
        .await?;

    let short_url = short_url(&base, &link.short_code);

    Ok(Json(ShortenResponse::created(link, short_url)))
}
