//! Bill retention sweep
//!
//! Deletes bills older than the configured age (two years by default).
//! Best-effort: a failing sweep is logged and retried on the next tick,
//! never fatal.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info};

use crate::config::RetentionSection;
use crate::domain::{DomainResult, RepositoryProvider};
use crate::shared::shutdown::ShutdownSignal;

pub struct RetentionSweeper {
    repos: Arc<dyn RepositoryProvider>,
    max_age: Duration,
    interval: std::time::Duration,
}

impl RetentionSweeper {
    pub fn new(repos: Arc<dyn RepositoryProvider>, cfg: &RetentionSection) -> Self {
        Self {
            repos,
            max_age: Duration::days(cfg.max_age_days),
            interval: std::time::Duration::from_secs(cfg.sweep_interval_hours * 3600),
        }
    }

    /// Run one sweep now.
    pub async fn purge_once(&self) -> DomainResult<u64> {
        let cutoff = Utc::now() - self.max_age;
        let removed = self.repos.bills().purge_older_than(cutoff).await?;
        if removed > 0 {
            info!(removed, %cutoff, "Purged expired bills");
        }
        Ok(removed)
    }

    /// Sweep immediately, then on an interval until shutdown.
    pub fn start(self: Arc<Self>, shutdown: ShutdownSignal) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                if let Err(e) = self.purge_once().await {
                    error!("Bill retention sweep failed: {}", e);
                }
                tokio::select! {
                    _ = tokio::time::sleep(self.interval) => {}
                    _ = shutdown.wait() => break,
                }
            }
        })
    }
}
