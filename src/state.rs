//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Cloneable handle to the services behind the HTTP layer.
///
/// The storage backend is erased behind `dyn LinkRepository`, so handlers are
/// identical for the Postgres and in-memory backends.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    /// Public prefix for short URLs; `None` derives it from the request.
    pub base_url: Option<Arc<str>>,
    /// Period of the background expiry sweeper, reported by the health check.
    pub sweep_interval: Duration,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        base_url: Option<String>,
        sweep_interval: Duration,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository)),
            base_url: base_url.map(Arc::from),
            sweep_interval,
        }
    }
}
