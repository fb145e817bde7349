//! Link creation, resolution and lookup service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_valid_custom_code};
use crate::utils::url_validator::validate_url;

/// Maximum number of links returned by the recent listing.
pub const RECENT_LIMIT: i64 = 5;

pub const INVALID_CODE_MESSAGE: &str =
    "Custom code can only contain letters, numbers, hyphens and underscores (max 20 chars)";
pub const INVALID_CODE_FORMAT_MESSAGE: &str = "Invalid code format. Only letters, numbers, hyphens and underscores are allowed (max 20 chars)";

/// Outcome of a short code availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeAvailability {
    Available,
    InUse,
    InvalidFormat,
}

impl CodeAvailability {
    pub fn is_available(self) -> bool {
        matches!(self, CodeAvailability::Available)
    }

    pub fn message(self) -> &'static str {
        match self {
            CodeAvailability::Available => "Code available",
            CodeAvailability::InUse => "Code already in use",
            CodeAvailability::InvalidFormat => INVALID_CODE_FORMAT_MESSAGE,
        }
    }
}

/// Service for creating and resolving expiring short links.
///
/// Holds no state of its own; every guarantee under concurrency comes from
/// the repository's atomic insert and atomic visit update.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link that expires `validity_minutes` from now.
    ///
    /// `url` and `custom_code` are trimmed; an empty custom code counts as
    /// absent.
    ///
    /// # Code Assignment
    ///
    /// - With a custom code: validate it and insert once. A duplicate key is
    ///   reported as [`AppError::CodeTaken`]; there is no fallback to a random code.
    /// - Without one: insert a random 6-character code, drawing a new one after
    ///   every duplicate key until an insert succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is missing or invalid, the
    /// custom code is malformed, or the expiry is out of range.
    /// Returns [`AppError::CodeTaken`] if the custom code already exists.
    pub async fn shorten(
        &self,
        url: &str,
        custom_code: Option<&str>,
        validity_minutes: i64,
    ) -> Result<Link, AppError> {
        let original_url = url.trim();
        if original_url.is_empty() {
            return Err(AppError::bad_request("URL is required", json!({})));
        }

        validate_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let custom_code = custom_code.map(str::trim).filter(|c| !c.is_empty());

        if let Some(code) = custom_code
            && !is_valid_custom_code(code)
        {
            return Err(AppError::bad_request(
                INVALID_CODE_MESSAGE,
                json!({ "code": code }),
            ));
        }

        let draft = |short_code: String| {
            NewLink::new(
                short_code,
                original_url.to_string(),
                Utc::now(),
                validity_minutes,
                custom_code.is_some(),
            )
            .ok_or_else(|| {
                AppError::bad_request(
                    "Validity is out of range",
                    json!({ "validity": validity_minutes }),
                )
            })
        };

        let link = match custom_code {
            Some(code) => match self.link_repository.insert(draft(code.to_string())?).await {
                Err(AppError::Conflict { .. }) => {
                    return Err(AppError::code_taken(
                        "This custom URL is already taken",
                        json!({ "code": code }),
                    ));
                }
                other => other?,
            },
            None => self.insert_with_random_code(draft(generate_code())?).await?,
        };

        metrics::counter!("links_created_total").increment(1);
        Ok(link)
    }

    /// Inserts `new_link`, replacing its code after every collision.
    ///
    /// Never gives up: a valid request must not fail because of bad luck.
    async fn insert_with_random_code(&self, mut new_link: NewLink) -> Result<Link, AppError> {
        loop {
            match self.link_repository.insert(new_link.clone()).await {
                Err(AppError::Conflict { .. }) => {
                    debug!(code = %new_link.short_code, "Generated code collided, retrying");
                    new_link = new_link.with_code(generate_code());
                }
                result => return result,
            }
        }
    }

    /// Resolves a code for redirection, counting the visit.
    ///
    /// The visit is recorded before the expiry check, so requests that end up
    /// reported as expired still increment `visits`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record holds `code` (including one
    /// swept mid-request) and [`AppError::Gone`] if it has expired.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        let now = Utc::now();
        let link = self
            .link_repository
            .increment_visit_and_touch(code, now)
            .await?
            .ok_or_else(|| url_not_found(code))?;

        if link.is_expired_at(Utc::now()) {
            return Err(url_expired(code));
        }

        Ok(link)
    }

    /// Looks up a link without touching its visit counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] or [`AppError::Gone`] like [`Self::resolve`].
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        let link = self.find_existing(code).await?;

        if link.is_expired_at(Utc::now()) {
            return Err(url_expired(code));
        }

        Ok(link)
    }

    /// Returns the full record, expired or not, until it is swept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record holds `code`.
    pub async fn get_stats(&self, code: &str) -> Result<Link, AppError> {
        self.find_existing(code).await
    }

    /// Returns up to [`RECENT_LIMIT`] unexpired links, newest first.
    pub async fn recent_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository
            .list_recent(RECENT_LIMIT, Utc::now())
            .await
    }

    /// Reports whether `code` could be claimed as a custom code right now.
    ///
    /// A code counts as in use only while an unexpired record holds it. An
    /// expired record that has not been swept yet is reported as available,
    /// even though inserting that code still fails until the sweep runs.
    pub async fn check_code_availability(&self, code: &str) -> Result<CodeAvailability, AppError> {
        if !is_valid_custom_code(code) {
            return Ok(CodeAvailability::InvalidFormat);
        }

        let occupied = self
            .link_repository
            .find_by_code(code)
            .await?
            .is_some_and(|link| link.is_active_at(Utc::now()));

        Ok(if occupied {
            CodeAvailability::InUse
        } else {
            CodeAvailability::Available
        })
    }

    /// Checks that the backing store is reachable.
    pub async fn storage_healthy(&self) -> bool {
        self.link_repository.health_check().await
    }

    async fn find_existing(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| url_not_found(code))
    }
}

fn url_not_found(code: &str) -> AppError {
    AppError::not_found("URL not found", json!({ "code": code }))
}

fn url_expired(code: &str) -> AppError {
    AppError::gone("URL has expired", json!({ "code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::{DateTime, Duration};
    use mockall::Sequence;

    fn stored(new_link: NewLink) -> Link {
        new_link.into_link()
    }

    fn test_link(code: &str, expires_in_minutes: i64) -> Link {
        let now = Utc::now();
        Link {
            short_code: code.to_string(),
            original_url: "https://example.com".to_string(),
            visits: 0,
            created_at: now,
            last_accessed: None,
            expires_at: now + Duration::minutes(expires_in_minutes),
            is_custom: false,
            validity_minutes: expires_in_minutes,
        }
    }

    fn duplicate() -> AppError {
        AppError::conflict("Short code already exists", json!({}))
    }

    #[tokio::test]
    async fn test_shorten_random_code_success() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_insert()
            .withf(|l| l.short_code.len() == 6 && !l.is_custom && l.validity_minutes == 30)
            .times(1)
            .returning(|l| Ok(stored(l)));

        let service = LinkService::new(Arc::new(mock_repo));
        let link = service
            .shorten("  https://example.com  ", None, 30)
            .await
            .unwrap();

        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.expires_at - link.created_at, Duration::minutes(30));
    }

    #[tokio::test]
    async fn test_shorten_retries_random_code_until_insert_succeeds() {
        let mut mock_repo = MockLinkRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_insert()
            .times(4)
            .in_sequence(&mut seq)
            .returning(|_| Err(duplicate()));
        mock_repo
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|l| Ok(stored(l)));

        let service = LinkService::new(Arc::new(mock_repo));
        let result = service.shorten("https://example.com", None, 30).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_shorten_custom_code_success() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_insert()
            .withf(|l| l.short_code == "My-Code_1" && l.is_custom)
            .times(1)
            .returning(|l| Ok(stored(l)));

        let service = LinkService::new(Arc::new(mock_repo));
        let link = service
            .shorten("https://example.com", Some(" My-Code_1 "), 30)
            .await
            .unwrap();

        assert_eq!(link.short_code, "My-Code_1");
        assert!(link.is_custom);
    }

    #[tokio::test]
    async fn test_shorten_custom_code_taken_does_not_fall_back() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(duplicate()));

        let service = LinkService::new(Arc::new(mock_repo));
        let result = service
            .shorten("https://example.com", Some("taken"), 30)
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::CodeTaken { .. }));
        assert_eq!(err.to_string(), "This custom URL is already taken");
    }

    #[tokio::test]
    async fn test_shorten_empty_custom_code_is_random() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_insert()
            .withf(|l| !l.is_custom && l.short_code.len() == 6)
            .times(1)
            .returning(|l| Ok(stored(l)));

        let service = LinkService::new(Arc::new(mock_repo));
        assert!(
            service
                .shorten("https://example.com", Some("   "), 30)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_shorten_invalid_custom_code() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_insert().times(0);

        let service = LinkService::new(Arc::new(mock_repo));
        let err = service
            .shorten("https://example.com", Some("bad code!"), 30)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), INVALID_CODE_MESSAGE);
    }

    #[tokio::test]
    async fn test_shorten_missing_and_invalid_url() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_insert().times(0);
        let service = LinkService::new(Arc::new(mock_repo));

        let err = service.shorten("   ", None, 30).await.unwrap_err();
        assert_eq!(err.to_string(), "URL is required");

        let err = service.shorten("not-a-url", None, 30).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid URL format");
    }

    #[tokio::test]
    async fn test_shorten_negative_validity_accepted() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_insert()
            .withf(|l| l.validity_minutes == -5 && l.expires_at < l.created_at)
            .times(1)
            .returning(|l| Ok(stored(l)));

        let service = LinkService::new(Arc::new(mock_repo));
        assert!(service.shorten("https://example.com", None, -5).await.is_ok());
    }

    #[tokio::test]
    async fn test_shorten_out_of_range_validity() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_insert().times(0);

        let service = LinkService::new(Arc::new(mock_repo));
        let err = service
            .shorten("https://example.com", None, i64::MAX)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_resolve_counts_visit_and_returns_link() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_visit_and_touch()
            .withf(|code, _| code == "abc123")
            .times(1)
            .returning(|code, now: DateTime<Utc>| {
                let mut link = test_link(code, 30);
                link.visits = 1;
                link.last_accessed = Some(now);
                Ok(Some(link))
            });
        mock_repo.expect_find_by_code().times(0);

        let service = LinkService::new(Arc::new(mock_repo));
        let link = service.resolve("abc123").await.unwrap();

        assert_eq!(link.visits, 1);
        assert!(link.last_accessed.is_some());
    }

    #[tokio::test]
    async fn test_resolve_expired_still_counts_visit() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_visit_and_touch()
            .times(1)
            .returning(|code, _| Ok(Some(test_link(code, -1))));

        let service = LinkService::new(Arc::new(mock_repo));
        let err = service.resolve("old").await.unwrap_err();

        assert!(matches!(err, AppError::Gone { .. }));
    }

    #[tokio::test]
    async fn test_resolve_vanished_record_is_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_visit_and_touch()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));
        let err = service.resolve("swept").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_link_does_not_increment() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_increment_visit_and_touch().times(0);
        mock_repo
            .expect_find_by_code()
            .times(2)
            .returning(|code| Ok(Some(test_link(code, if code == "old" { -1 } else { 5 }))));

        let service = LinkService::new(Arc::new(mock_repo));

        assert!(service.get_link("fresh").await.is_ok());
        assert!(matches!(
            service.get_link("old").await.unwrap_err(),
            AppError::Gone { .. }
        ));
    }

    #[tokio::test]
    async fn test_get_stats_ignores_expiry() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(test_link(code, -60))));

        let service = LinkService::new(Arc::new(mock_repo));
        let link = service.get_stats("old").await.unwrap();

        assert_eq!(link.short_code, "old");
    }

    #[tokio::test]
    async fn test_recent_links_uses_limit() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_list_recent()
            .withf(|limit, _| *limit == RECENT_LIMIT)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = LinkService::new(Arc::new(mock_repo));
        assert!(service.recent_links().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_code_availability() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_code().returning(|code| {
            Ok(match code {
                "live" => Some(test_link(code, 10)),
                "old" => Some(test_link(code, -10)),
                _ => None,
            })
        });

        let service = LinkService::new(Arc::new(mock_repo));

        assert_eq!(
            service.check_code_availability("live").await.unwrap(),
            CodeAvailability::InUse
        );
        assert_eq!(
            service.check_code_availability("old").await.unwrap(),
            CodeAvailability::Available
        );
        assert_eq!(
            service.check_code_availability("free").await.unwrap(),
            CodeAvailability::Available
        );
        assert_eq!(
            service.check_code_availability("bad code!").await.unwrap(),
            CodeAvailability::InvalidFormat
        );
    }
}
