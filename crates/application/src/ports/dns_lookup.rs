use async_trait::async_trait;
use adns_domain::{CachedRecord, DnsQuery, DomainError};

/// Result of a successful lookup. Each record's `ttl` is the time it has left,
/// not the TTL it was originally fetched with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResolution {
    pub records: Vec<CachedRecord>,
    pub cache_hit: bool,
}

impl DnsResolution {
    pub fn new(records: Vec<CachedRecord>, cache_hit: bool) -> Self {
        Self { records, cache_hit }
    }
}

#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// Answer from cache, or query upstream on a miss.
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError>;

    /// Re-warm the cache for `query` without waiting for an answer.
    async fn refresh(&self, query: &DnsQuery) -> Result<(), DomainError>;
}
