use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Explicit upstream name server, queried ahead of the system ones.
    #[serde(default)]
    pub nameserver: Option<String>,

    #[serde(default = "default_resolv_conf")]
    pub resolv_conf: String,

    /// Upstream query timeout in milliseconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    #[serde(default = "default_true")]
    pub refresh_enabled: bool,

    /// Seconds between background refresh cycles.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    /// Share of a record's TTL that must be consumed before it is re-warmed.
    #[serde(default = "default_refresh_threshold")]
    pub refresh_threshold: f64,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            nameserver: None,
            resolv_conf: default_resolv_conf(),
            query_timeout: default_query_timeout(),
            refresh_enabled: default_true(),
            refresh_interval: default_refresh_interval(),
            refresh_threshold: default_refresh_threshold(),
        }
    }
}

fn default_resolv_conf() -> String {
    "/etc/resolv.conf".to_string()
}

fn default_query_timeout() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_refresh_threshold() -> f64 {
    0.75
}
