//! Read-only link lookup handlers.
//!
//! None of these endpoints count a visit.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};

use crate::api::dto::link::{LinkStats, LinkSummary, RecentLink};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::host_url::{host_url, short_url};

/// Returns a link summary without following it.
///
/// # Endpoint
///
/// `GET /api/url/{code}`
///
/// # Errors
///
/// Returns 404 Not Found for unknown codes and 410 Gone for expired links.
pub async fn url_info_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkSummary>, AppError> {
    let link = state.link_service.get_link(&code).await?;
    Ok(Json(link.into()))
}

/// Returns the full stored record.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// Expired links stay visible here until the sweeper deletes them.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkStats>, AppError> {
    let link = state.link_service.get_stats(&code).await?;
    Ok(Json(link.into()))
}

/// Lists the newest unexpired links.
///
/// # Endpoint
///
/// `GET /api/recent`
///
/// # Response
///
/// A JSON array of at most 5 links, newest first, each with its `short_url`.
pub async fn recent_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<RecentLink>>, AppError> {
    let base = host_url(&headers, state.base_url.as_deref())?;
    let links = state.link_service.recent_links().await?;

    let items = links
        .into_iter()
        .map(|link| {
            let url = short_url(&base, &link.short_code);
            RecentLink::new(link, url)
        })
        .collect();

    Ok(Json(items))
}
