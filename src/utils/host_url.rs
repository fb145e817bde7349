//! Public base URL resolution for building `short_url` values.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// Header set by reverse proxies carrying the client-facing scheme.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Returns the base URL short codes are appended to, always ending in `/`.
///
/// A configured base URL wins. Otherwise the base is built from the request:
/// the scheme from `X-Forwarded-Proto` (default `http`) and the `Host` header
/// verbatim, port included.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no base URL is configured and the
/// `Host` header is missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:5000".parse().unwrap());
///
/// assert_eq!(host_url(&headers, None).unwrap(), "http://localhost:5000/");
/// ```
pub fn host_url(headers: &HeaderMap, configured: Option<&str>) -> Result<String, AppError> {
    if let Some(base) = configured {
        return Ok(with_trailing_slash(base));
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?;

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| matches!(*s, "http" | "https"))
        .unwrap_or("http");

    Ok(format!("{}://{}/", scheme, host.trim_end_matches('/')))
}

/// Joins a base URL and a short code.
pub fn short_url(base: &str, code: &str) -> String {
    format!("{}{}", with_trailing_slash(base), code)
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}
