//! In-process link repository backed by a concurrent map.
//!
//! Suitable for development and tests. Data does not survive a restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Link storage in a [`DashMap`] keyed by `short_code`.
///
/// Each operation on a single key runs under that key's shard lock, which
/// gives the same guarantees as the database: an insert either claims a
/// vacant key or fails, and a visit increment cannot be lost.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: DashMap<String, Link>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored, expired ones included.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.links.entry(new_link.short_code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": new_link.short_code }),
            )),
            Entry::Vacant(slot) => {
                let link = new_link.into_link();
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn increment_visit_and_touch(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError> {
        Ok(self.links.get_mut(code).map(|mut entry| {
            let link = entry.value_mut();
            link.visits += 1;
            link.last_accessed = Some(now);
            link.clone()
        }))
    }

    async fn delete_expired(&self, before: DateTime<Utc>) -> Result<u64, AppError> {
        let mut removed = 0u64;
        self.links.retain(|_, link| {
            let expired = link.expires_at < before;
            if expired {
                removed += 1;
            }
            !expired
        });
        Ok(removed)
    }

    async fn list_recent(
        &self,
        limit: i64,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .filter(|entry| entry.value().is_active_at(as_of))
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.short_code.cmp(&b.short_code))
        });
        links.truncate(usize::try_from(limit).unwrap_or(0));

        Ok(links)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
