//! DTOs for link lookup, statistics and recent listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// Record summary returned by `GET /api/url/{code}`.
#[derive(Debug, Serialize)]
pub struct LinkSummary {
    pub original_url: String,
    pub short_code: String,
    pub expires_at: DateTime<Utc>,
    pub visits: i64,
}

impl From<Link> for LinkSummary {
    fn from(link: Link) -> Self {
        Self {
            original_url: link.original_url,
            short_code: link.short_code,
            expires_at: link.expires_at,
            visits: link.visits,
        }
    }
}

/// Full record returned by `GET /api/stats/{code}`.
#[derive(Debug, Serialize)]
pub struct LinkStats {
    pub original_url: String,
    pub short_code: String,
    pub visits: i64,
    pub created_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub is_custom: bool,
    pub validity_minutes: i64,
}

impl From<Link> for LinkStats {
    fn from(link: Link) -> Self {
        Self {
            original_url: link.original_url,
            short_code: link.short_code,
            visits: link.visits,
            created_at: link.created_at,
            last_accessed: link.last_accessed,
            expires_at: link.expires_at,
            is_custom: link.is_custom,
            validity_minutes: link.validity_minutes,
        }
    }
}

/// One entry of `GET /api/recent`.
#[derive(Debug, Serialize)]
pub struct RecentLink {
    pub original_url: String,
    pub short_url: String,
    pub short_code: String,
    pub visits: i64,
    pub created_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub is_custom: bool,
}

impl RecentLink {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            original_url: link.original_url,
            short_url,
            short_code: link.short_code,
            visits: link.visits,
            created_at: link.created_at,
            last_accessed: link.last_accessed,
            expires_at: link.expires_at,
            is_custom: link.is_custom,
        }
    }
}
