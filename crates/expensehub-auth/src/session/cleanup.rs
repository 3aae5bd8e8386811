//! Periodic removal of expired and terminated sessions.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info};

use expensehub_core::result::AppResult;
use expensehub_database::store::SessionStore;

/// Sweeps inactive session rows on a fixed interval.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    sessions: Arc<dyn SessionStore>,
    interval: Duration,
}

impl SessionCleanup {
    /// Creates a cleanup task running every `interval_minutes` (at least one).
    pub fn new(sessions: Arc<dyn SessionStore>, interval_minutes: u64) -> Self {
        Self {
            sessions,
            interval: Duration::from_secs(interval_minutes.max(1) * 60),
        }
    }

    /// Runs a single sweep, returning how many sessions were removed.
    pub async fn run_cleanup(&self) -> AppResult<u64> {
        let removed = self.sessions.delete_inactive(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "Session cleanup completed");
        } else {
            debug!("Session cleanup found nothing to remove");
        }
        Ok(removed)
    }

    /// Sweep until the cancel signal flips to `true`.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(interval_secs = self.interval.as_secs(), "Session cleanup started");
        let mut ticker = tokio::time::interval(self.interval);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.run_cleanup().await {
                        error!(error = %e, "Session cleanup failed");
                    }
                }
            }
        }

        info!("Session cleanup stopped");
    }
}
