use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No name server found")]
    NoNameServer,

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Transport failure talking to {server}: {reason}")]
    TransportFailure { server: String, reason: String },

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("No {record_type} record returned for {domain}")]
    EmptyAnswer { domain: String, record_type: String },

    #[error("Lookup service is not running")]
    ServiceUnavailable,
}

impl DomainError {
    /// Message handed back to lookup callers for this failure.
    pub fn caller_message(&self) -> String {
        match self {
            Self::TransportFailure { .. } | Self::TransportTimeout { .. } => {
                "Dns query failed".to_string()
            }
            Self::InvalidDnsResponse(_) => {
                "Dns query failed, check whether domain is correct".to_string()
            }
            Self::EmptyAnswer { .. } => "Dns query failed, no ip returned".to_string(),
            Self::InvalidDomainName(reason) => format!("query dns error: {}", reason),
            Self::ServiceUnavailable => "query dns error: service unavailable".to_string(),
            Self::ConfigError(_) | Self::NoNameServer => format!("query dns error: {}", self),
        }
    }
}
