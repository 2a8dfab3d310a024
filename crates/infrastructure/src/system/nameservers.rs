use crate::dns::transport::DNS_PORT;
use adns_domain::DomainError;
use resolv_conf::ScopedIp;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use tracing::{debug, info, warn};

/// Ordered upstream name servers. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameServers {
    servers: Vec<SocketAddr>,
}

impl NameServers {
    /// Override first, then every `nameserver` line of `resolv_conf_path` in
    /// file order. An unreadable resolv.conf only contributes nothing.
    pub fn resolve(override_addr: Option<&str>, resolv_conf_path: &Path) -> Result<Self, DomainError> {
        let contents = match std::fs::read(resolv_conf_path) {
            Ok(contents) => Some(contents),
            Err(e) => {
                warn!(path = %resolv_conf_path.display(), error = %e, "Cannot read resolver configuration");
                None
            }
        };

        Self::from_sources(override_addr, contents.as_deref())
    }

    pub fn from_sources(
        override_addr: Option<&str>,
        resolv_conf: Option<&[u8]>,
    ) -> Result<Self, DomainError> {
        let mut servers: Vec<SocketAddr> = Vec::new();

        if let Some(raw) = override_addr.map(str::trim).filter(|s| !s.is_empty()) {
            let addr = parse_server_addr(raw).ok_or_else(|| {
                DomainError::ConfigError(format!("Invalid name server override '{}'", raw))
            })?;
            debug!(server = %addr, "Using name server override");
            servers.push(addr);
        }

        if let Some(bytes) = resolv_conf {
            match resolv_conf::Config::parse(bytes) {
                Ok(config) => {
                    for scoped in &config.nameservers {
                        let ip = match scoped {
                            ScopedIp::V4(ip) => IpAddr::V4(*ip),
                            ScopedIp::V6(ip, _) => IpAddr::V6(*ip),
                        };
                        let addr = SocketAddr::new(ip, DNS_PORT);
                        if !servers.contains(&addr) {
                            servers.push(addr);
                        }
                    }
                }
                Err(e) => warn!(error = %e, "Failed to parse resolver configuration"),
            }
        }

        if servers.is_empty() {
            return Err(DomainError::NoNameServer);
        }

        info!(primary = %servers[0], total = servers.len(), "Name servers resolved");
        Ok(Self { servers })
    }

    /// The only server queries are sent to.
    pub fn primary(&self) -> SocketAddr {
        self.servers[0]
    }

    pub fn all(&self) -> &[SocketAddr] {
        &self.servers
    }
}

/// Accepts `IP`, `IP:port` or `[v6]:port`; the port defaults to 53.
pub fn parse_server_addr(raw: &str) -> Option<SocketAddr> {
    if let Ok(addr) = raw.parse::<SocketAddr>() {
        return Some(addr);
    }
    let bare = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(raw);
    bare.parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
}
