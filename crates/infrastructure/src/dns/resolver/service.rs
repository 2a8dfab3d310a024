use super::coordinator::{Command, ResolutionCoordinator};
use async_trait::async_trait;
use adns_application::ports::{
    CacheRefreshOutcome, CacheRefreshPort, DnsLookup, DnsResolution, UpstreamTransport,
};
use adns_domain::{CachedRecord, DnsQuery, DomainError};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

pub const COMMAND_CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
pub struct LookupServiceConfig {
    /// Primary name server; the only one queried.
    pub nameserver: SocketAddr,
    pub query_timeout: Duration,
}

/// Cloneable handle onto the resolution coordinator task.
///
/// The task exits once every handle has been dropped.
#[derive(Clone)]
pub struct LookupService {
    commands: mpsc::Sender<Command>,
}

impl LookupService {
    /// Spawns the coordinator onto the current tokio runtime.
    pub fn spawn(config: LookupServiceConfig, transport: Arc<dyn UpstreamTransport>) -> Self {
        let (commands, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);

        info!(
            nameserver = %config.nameserver,
            timeout_ms = config.query_timeout.as_millis() as u64,
            "Spawning lookup service"
        );

        let coordinator =
            ResolutionCoordinator::new(config.nameserver, config.query_timeout, transport, rx);
        tokio::spawn(coordinator.run());

        Self { commands }
    }

    async fn request<T: Send>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, DomainError> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(build(tx))
            .await
            .map_err(|_| DomainError::ServiceUnavailable)?;
        rx.await.map_err(|_| DomainError::ServiceUnavailable)
    }

    /// Unexpired cached records only; never goes upstream.
    pub async fn try_cache(&self, query: &DnsQuery) -> Result<Vec<CachedRecord>, DomainError> {
        let query = query.clone();
        self.request(|reply| Command::CacheOnly { query, reply }).await
    }

    pub async fn cache_size(&self) -> Result<usize, DomainError> {
        self.request(|reply| Command::CacheSize { reply }).await
    }
}

#[async_trait]
impl DnsLookup for LookupService {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        let query = query.clone();
        self.request(|reply| Command::Lookup { query, reply }).await?
    }

    async fn refresh(&self, query: &DnsQuery) -> Result<(), DomainError> {
        let query = query.clone();
        self.request(|reply| Command::Refresh { query, reply }).await?
    }
}

#[async_trait]
impl CacheRefreshPort for LookupService {
    async fn run_refresh_cycle(&self, threshold: f64) -> Result<CacheRefreshOutcome, DomainError> {
        self.request(|reply| Command::RefreshStale { threshold, reply }).await
    }
}
