//! adns domain layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod lookup;

pub use config::{CliOverrides, Config, ConfigError, DnsConfig, LoggingConfig};
pub use dns_query::DnsQuery;
pub use dns_record::{CachedRecord, RecordSet, RecordType};
pub use errors::DomainError;
pub use lookup::{LookupRequest, LookupResponse, ResolvedAddress};
