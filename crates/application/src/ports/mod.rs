mod cache_refresh_port;
mod dns_lookup;
mod upstream_transport;

pub use cache_refresh_port::{CacheRefreshOutcome, CacheRefreshPort};
pub use dns_lookup::{DnsLookup, DnsResolution};
pub use upstream_transport::{TransportReply, TransportStatus, UpstreamTransport};

// Re-export for convenience
pub use adns_domain::DnsQuery;
