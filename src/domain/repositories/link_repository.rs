//! Repository trait for short link storage.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage contract for short links, keyed uniquely by `short_code`.
///
/// All concurrency control is delegated to the implementation: `insert` must
/// enforce uniqueness atomically and `increment_visit_and_touch` must update in
/// place, never as a read-modify-write in the caller.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a record with the same `short_code`
    /// exists, expired or not. Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code, regardless of expiry.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Atomically increments `visits` and sets `last_accessed = now`.
    ///
    /// Returns the post-update record, or `Ok(None)` if no record holds `code`
    /// (including one removed by a concurrent sweep).
    async fn increment_visit_and_touch(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError>;

    /// Deletes every record with `expires_at < before` and returns how many were removed.
    async fn delete_expired(&self, before: DateTime<Utc>) -> Result<u64, AppError>;

    /// Returns up to `limit` records with `expires_at > as_of`, newest first.
    async fn list_recent(&self, limit: i64, as_of: DateTime<Utc>)
    -> Result<Vec<Link>, AppError>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> bool;
}
