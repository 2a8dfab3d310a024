use adns_application::ports::CacheRefreshPort;
use adns_application::use_cases::HandleLookupUseCase;
use adns_domain::Config;
use adns_infrastructure::dns::{LookupService, LookupServiceConfig, UdpTransport};
use adns_infrastructure::system::NameServers;
use adns_jobs::CacheRefreshJob;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub lookup: LookupService,
    pub handle_lookup: Arc<HandleLookupUseCase>,
}

impl DnsServices {
    /// Resolves name servers and spawns the lookup service. No usable name
    /// server is fatal.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let nameservers = NameServers::resolve(
            config.dns.nameserver.as_deref(),
            Path::new(&config.dns.resolv_conf),
        )?;

        info!(
            primary = %nameservers.primary(),
            configured = nameservers.all().len(),
            timeout_ms = config.dns.query_timeout,
            "Initializing DNS services"
        );

        let lookup = LookupService::spawn(
            LookupServiceConfig {
                nameserver: nameservers.primary(),
                query_timeout: Duration::from_millis(config.dns.query_timeout),
            },
            Arc::new(UdpTransport::new()),
        );
        let handle_lookup = Arc::new(HandleLookupUseCase::new(Arc::new(lookup.clone())));

        Ok(Self {
            lookup,
            handle_lookup,
        })
    }

    pub fn cache_refresh_job(&self, config: &Config) -> Option<CacheRefreshJob> {
        if !config.dns.refresh_enabled {
            return None;
        }
        let port: Arc<dyn CacheRefreshPort> = Arc::new(self.lookup.clone());
        Some(
            CacheRefreshJob::new(port)
                .with_interval(config.dns.refresh_interval)
                .with_threshold(config.dns.refresh_threshold),
        )
    }
}
