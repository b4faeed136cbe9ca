use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::error::AppError;
use crate::session::SessionStore;

/// Periodically drops session entries older than the configured TTL.
pub struct SessionSweeper {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
    interval: Duration,
}

impl SessionSweeper {
    pub fn new(store: Arc<dyn SessionStore>, ttl_secs: u64, interval_secs: u64) -> Self {
        Self {
            store,
            ttl: Duration::from_secs(ttl_secs),
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// Runs forever; a failed sweep is logged and the loop carries on.
    pub async fn start(self) {
        info!(
            "Starting session sweeper (ttl: {:?}, interval: {:?})",
            self.ttl, self.interval
        );

        loop {
            tokio::time::sleep(self.interval).await;

            match self.run_sweep().await {
                Ok(removed) if removed > 0 => info!("Session sweep removed {} entries", removed),
                Ok(_) => {}
                Err(e) => warn!("Session sweep failed: {:?}", e),
            }
        }
    }

    pub async fn run_sweep(&self) -> Result<u64, AppError> {
        let ttl = chrono::Duration::from_std(self.ttl).map_err(|_| AppError::InternalServerError)?;
        self.store.purge_older_than(Utc::now() - ttl).await
    }
}
