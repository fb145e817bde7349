//! Background task that purges expired links.
//!
//! Liveness never depends on the sweeper: lookups check `expires_at`
//! themselves. The sweeper only reclaims storage and, once a row is gone,
//! frees its code for reuse.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, error, info};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Default period between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Periodic `delete_expired(now)` runner.
pub struct ExpirySweeper<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    period: Duration,
}

impl<R: LinkRepository + ?Sized> ExpirySweeper<R> {
    pub fn new(repository: Arc<R>, period: Duration) -> Self {
        Self { repository, period }
    }

    /// Deletes every link that expired before now and returns the count.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from [`LinkRepository::delete_expired`].
    pub async fn sweep_once(&self) -> Result<u64, AppError> {
        let removed = self.repository.delete_expired(Utc::now()).await?;
        metrics::counter!("links_swept_total").increment(removed);
        Ok(removed)
    }

    /// Runs until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// The first sweep happens one full period after start. A failed sweep is
    /// logged and retried on the next tick.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(period_secs = self.period.as_secs(), "Expiry sweeper started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    debug!("Running expiry sweep");
                    match self.sweep_once().await {
                        Ok(removed) => info!("Cleaned up {} expired URLs", removed),
                        Err(e) => error!(error = %e, "Expiry sweep failed"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Expiry sweeper stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_sweep_once_returns_deleted_count() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_delete_expired()
            .times(1)
            .returning(|_| Ok(3));

        let sweeper = ExpirySweeper::new(Arc::new(mock_repo), DEFAULT_SWEEP_INTERVAL);

        assert_eq!(sweeper.sweep_once().await.unwrap(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_sweeps_each_period_and_survives_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_mock = calls.clone();

        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_delete_expired().returning(move |_| {
            if calls_in_mock.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::internal("Database error", json!({})))
            } else {
                Ok(1)
            }
        });

        let (tx, rx) = watch::channel(false);
        let sweeper = ExpirySweeper::new(Arc::new(mock_repo), Duration::from_secs(60));
        let handle = tokio::spawn(sweeper.run(rx));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_run_stops_when_sender_dropped() {
        let mock_repo = MockLinkRepository::new();
        let (tx, rx) = watch::channel(false);
        let sweeper = ExpirySweeper::new(Arc::new(mock_repo), DEFAULT_SWEEP_INTERVAL);
        let handle = tokio::spawn(sweeper.run(rx));

        drop(tx);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("sweeper did not stop")
            .unwrap();
    }
}
