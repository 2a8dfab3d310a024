use async_trait::async_trait;
use adns_domain::DomainError;

/// Outcome of a cache refresh cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheRefreshOutcome {
    pub candidates_found: usize,
    pub dispatched: usize,
    pub cache_size: usize,
}

/// Port for proactive cache re-warming.
#[async_trait]
pub trait CacheRefreshPort: Send + Sync {
    /// Dispatch refresh-only lookups for entries that have consumed at least
    /// `threshold` of their TTL.
    async fn run_refresh_cycle(&self, threshold: f64) -> Result<CacheRefreshOutcome, DomainError>;
}
