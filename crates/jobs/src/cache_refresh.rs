use adns_application::ports::CacheRefreshPort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
const DEFAULT_REFRESH_THRESHOLD: f64 = 0.75;

/// Periodically re-warms cache entries that are close to expiry.
pub struct CacheRefreshJob {
    refresh: Arc<dyn CacheRefreshPort>,
    interval_secs: u64,
    threshold: f64,
    shutdown: CancellationToken,
}

impl CacheRefreshJob {
    pub fn new(refresh: Arc<dyn CacheRefreshPort>) -> Self {
        Self {
            refresh,
            interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            threshold: DEFAULT_REFRESH_THRESHOLD,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs.max(1);
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            threshold = self.threshold,
            "Starting cache refresh job"
        );

        let job = Arc::clone(&self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(job.interval_secs));
            loop {
                tokio::select! {
                    _ = job.shutdown.cancelled() => {
                        info!("CacheRefreshJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        job.run_once().await;
                    }
                }
            }
        });
    }

    async fn run_once(&self) {
        match self.refresh.run_refresh_cycle(self.threshold).await {
            Ok(outcome) if outcome.candidates_found > 0 => {
                info!(
                    candidates = outcome.candidates_found,
                    dispatched = outcome.dispatched,
                    cache_size = outcome.cache_size,
                    "Cache refresh cycle completed"
                );
            }
            Ok(outcome) => {
                debug!(cache_size = outcome.cache_size, "Cache refresh cycle found nothing stale");
            }
            Err(e) => {
                error!(error = %e, "Cache refresh cycle failed");
            }
        }
    }
}
