#![allow(dead_code)]

use axum_test::TestServer;
use chrono::Utc;
use std::sync::Arc;
use ephemeral_links::domain::entities::{Link, NewLink};
use ephemeral_links::domain::expiry_sweeper::DEFAULT_SWEEP_INTERVAL;
use ephemeral_links::domain::repositories::LinkRepository;
use ephemeral_links::infrastructure::persistence::MemoryLinkRepository;
use ephemeral_links::routes::router;
use ephemeral_links::state::AppState;

pub const BASE_URL: &str = "http://sho.rt/";

/// State over a fresh in-memory store, with a fixed public base URL.
pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    create_test_state_with_base(Some(BASE_URL))
}

pub fn create_test_state_with_base(
    base_url: Option<&str>,
) -> (AppState, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let state = AppState::new(
        repo.clone(),
        base_url.map(str::to_string),
        DEFAULT_SWEEP_INTERVAL,
    );
    (state, repo)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// Stores a link created now that expires after `validity_minutes`.
pub async fn create_test_link(
    repo: &MemoryLinkRepository,
    code: &str,
    url: &str,
    validity_minutes: i64,
) -> Link {
    let new_link = NewLink::new(
        code.to_string(),
        url.to_string(),
        Utc::now(),
        validity_minutes,
        true,
    )
    .unwrap();

    repo.insert(new_link).await.unwrap()
}
