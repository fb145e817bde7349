//! Link entity representing a short code and its expiring target.

use chrono::{DateTime, Duration, Utc};

/// Default time-to-live for a new link, in minutes.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// A stored short link.
///
/// `expires_at` is fixed at creation as `created_at + validity_minutes` and is
/// never recomputed. `visits` and `last_accessed` change only on redirects.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub short_code: String,
    pub original_url: String,
    pub visits: i64,
    pub created_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub is_custom: bool,
    pub validity_minutes: i64,
}

impl Link {
    /// Returns true if the link's TTL elapsed strictly before `now`.
    ///
    /// Lookups and redirects report such links as expired even while the row
    /// is still present in storage.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Returns true if the link still occupies its code at `now`.
    ///
    /// Used by the recent listing and the availability check, which treat a
    /// link as live only while `expires_at > now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_custom: bool,
    pub validity_minutes: i64,
}

impl NewLink {
    /// Builds a record created at `created_at` that expires `validity_minutes` later.
    ///
    /// Zero and negative validities are accepted and yield links that are
    /// already expired (or expire immediately).
    ///
    /// Returns `None` if the expiry falls outside the representable time range.
    pub fn new(
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        validity_minutes: i64,
        is_custom: bool,
    ) -> Option<Self> {
        let expires_at = Duration::try_minutes(validity_minutes)
            .and_then(|ttl| created_at.checked_add_signed(ttl))?;

        Some(Self {
            short_code,
            original_url,
            created_at,
            expires_at,
            is_custom,
            validity_minutes,
        })
    }

    /// Same record under a different code; used when retrying after a collision.
    pub fn with_code(self, short_code: String) -> Self {
        Self { short_code, ..self }
    }

    /// The stored form of this record before any redirect.
    pub fn into_link(self) -> Link {
        Link {
            short_code: self.short_code,
            original_url: self.original_url,
            visits: 0,
            created_at: self.created_at,
            last_accessed: None,
            expires_at: self.expires_at,
            is_custom: self.is_custom,
            validity_minutes: self.validity_minutes,
        }
    }
}
