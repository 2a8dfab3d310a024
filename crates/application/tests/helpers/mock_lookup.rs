#![allow(dead_code)]

use adns_application::ports::{DnsLookup, DnsResolution};
use adns_domain::{CachedRecord, DnsQuery, DomainError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockDnsLookup {
    responses: Arc<RwLock<HashMap<String, Result<DnsResolution, DomainError>>>>,
    refreshed: Arc<RwLock<Vec<DnsQuery>>>,
    resolve_calls: Arc<AtomicUsize>,
}

impl MockDnsLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_records(&self, domain: &str, records: &[(&str, u32)], cache_hit: bool) {
        let records = records
            .iter()
            .map(|(ip, ttl)| CachedRecord::new(ip.parse().unwrap(), *ttl))
            .collect();
        self.responses
            .write()
            .await
            .insert(domain.to_string(), Ok(DnsResolution::new(records, cache_hit)));
    }

    pub async fn set_error(&self, domain: &str, error: DomainError) {
        self.responses
            .write()
            .await
            .insert(domain.to_string(), Err(error));
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub async fn refreshed(&self) -> Vec<DnsQuery> {
        self.refreshed.read().await.clone()
    }
}

#[async_trait]
impl DnsLookup for MockDnsLookup {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .read()
            .await
            .get(query.domain.as_ref())
            .cloned()
            .unwrap_or_else(|| {
                Err(DomainError::EmptyAnswer {
                    domain: query.domain.to_string(),
                    record_type: query.record_type.to_string(),
                })
            })
    }

    async fn refresh(&self, query: &DnsQuery) -> Result<(), DomainError> {
        self.refreshed.write().await.push(query.clone());
        Ok(())
    }
}
