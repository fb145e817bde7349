//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_short_code_conflict;

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness of `short_code` is the table's primary key; visit updates are a
/// single `UPDATE ... RETURNING` statement.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    short_code: String,
    original_url: String,
    visits: i64,
    created_at: DateTime<Utc>,
    last_accessed: Option<DateTime<Utc>>,
    expires_at: DateTime<Utc>,
    is_custom: bool,
    validity_minutes: i64,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            short_code: r.short_code,
            original_url: r.original_url,
            visits: r.visits,
            created_at: r.created_at,
            last_accessed: r.last_accessed,
            expires_at: r.expires_at,
            is_custom: r.is_custom,
            validity_minutes: r.validity_minutes,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let result = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links
                (short_code, original_url, visits, created_at, last_accessed,
                 expires_at, is_custom, validity_minutes)
            VALUES ($1, $2, 0, $3, NULL, $4, $5, $6)
            RETURNING short_code, original_url, visits, created_at, last_accessed,
                      expires_at, is_custom, validity_minutes
            "#,
        )
        .bind(&new_link.short_code)
        .bind(&new_link.original_url)
        .bind(new_link.created_at)
        .bind(new_link.expires_at)
        .bind(new_link.is_custom)
        .bind(new_link.validity_minutes)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_short_code_conflict(&e) => Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": new_link.short_code }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT short_code, original_url, visits, created_at, last_accessed,
                   expires_at, is_custom, validity_minutes
            FROM links
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn increment_visit_and_touch(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET visits = visits + 1, last_accessed = $2
            WHERE short_code = $1
            RETURNING short_code, original_url, visits, created_at, last_accessed,
                      expires_at, is_custom, validity_minutes
            "#,
        )
        .bind(code)
        .bind(now)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn delete_expired(&self, before: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE expires_at < $1")
            .bind(before)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_recent(
        &self,
        limit: i64,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT short_code, original_url, visits, created_at, last_accessed,
                   expires_at, is_custom, validity_minutes
            FROM links
            WHERE expires_at > $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(as_of)
        .bind(limit.max(0))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
