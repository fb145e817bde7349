//! Handler for custom code availability checks.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::check_code::CheckCodeResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Reports whether a custom code can be claimed.
///
/// # Endpoint
///
/// `GET /api/check-code/{code}`
///
/// # Response
///
/// ```json
/// { "available": false, "message": "Code already in use" }
/// ```
///
/// Malformed codes are always unavailable. A code whose link has expired but
/// has not been swept yet is reported as available, although creating a link
/// with it keeps failing until the sweep removes the old record.
pub async fn check_code_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CheckCodeResponse>, AppError> {
    let availability = state.link_service.check_code_availability(&code).await?;
    Ok(Json(availability.into()))
}
