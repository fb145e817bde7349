//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::entities::{DEFAULT_VALIDITY_MINUTES, Link};

/// Request to shorten a single URL.
///
/// Every field is optional at the parsing stage so that a missing `url`
/// surfaces as a validation message rather than a deserialization failure.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be HTTP/HTTPS).
    #[serde(default)]
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: Option<String>,

    /// Optional custom short code; blank means none.
    #[serde(default)]
    pub custom_code: Option<String>,

    /// Time-to-live in minutes. Accepts a number or a numeric string.
    #[serde(default)]
    pub validity: Option<Value>,
}

impl ShortenRequest {
    /// Validity in minutes after coercion, see [`coerce_validity`].
    pub fn validity_minutes(&self) -> i64 {
        coerce_validity(self.validity.as_ref())
    }
}

/// Coerces a loosely typed `validity` value into whole minutes.
///
/// Numbers truncate toward zero, strings are parsed the same way, and anything
/// else falls back to [`DEFAULT_VALIDITY_MINUTES`]. Zero and negative values
/// pass through unchanged.
pub fn coerce_validity(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(truncate_minutes))
            .unwrap_or(DEFAULT_VALIDITY_MINUTES),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_minutes))
                .unwrap_or(DEFAULT_VALIDITY_MINUTES)
        }
        _ => DEFAULT_VALIDITY_MINUTES,
    }
}

fn truncate_minutes(value: f64) -> Option<i64> {
    // `as` saturates; out-of-range values are rejected later as an overflowing expiry.
    value.is_finite().then(|| value.trunc() as i64)
}

/// Response for a newly created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
    pub short_code: String,
    pub expires_at: DateTime<Utc>,
    pub status: &'static str,
    pub is_custom: bool,
}

impl ShortenResponse {
    pub fn created(link: Link, short_url: String) -> Self {
        Self {
            original_url: link.original_url,
            short_url,
            short_code: link.short_code,
            expires_at: link.expires_at,
            status: "created",
            is_custom: link.is_custom,
        }
    }
}
