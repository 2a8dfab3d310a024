use serde::{Deserialize, Serialize};

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;

/// Environment variable holding the name server override.
pub const NAMESERVER_ENV: &str = "ADNS_NAMESERVER";

/// Main configuration structure for adns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Upstream resolution configuration
    #[serde(default)]
    pub dns: DnsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. adns.toml in current directory
    /// 3. /etc/adns/config.toml
    /// 4. Default configuration
    ///
    /// The `ADNS_NAMESERVER` environment variable is applied on top of the
    /// file, and command-line overrides on top of both.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_env_overrides(std::env::var(NAMESERVER_ENV).ok());
        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_env_overrides(&mut self, nameserver: Option<String>) {
        if let Some(ns) = nameserver.filter(|ns| !ns.trim().is_empty()) {
            self.dns.nameserver = Some(ns.trim().to_string());
        }
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(ns) = overrides.nameserver {
            self.dns.nameserver = Some(ns);
        }
        if let Some(timeout) = overrides.query_timeout {
            self.dns.query_timeout = timeout;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "Query timeout cannot be 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.dns.refresh_threshold) {
            return Err(ConfigError::Validation(format!(
                "Refresh threshold must be between 0 and 1, got {}",
                self.dns.refresh_threshold
            )));
        }

        if self.dns.refresh_enabled && self.dns.refresh_interval == 0 {
            return Err(ConfigError::Validation(
                "Refresh interval cannot be 0 while refresh is enabled".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("adns.toml").exists() {
            Some("adns.toml".to_string())
        } else if std::path::Path::new("/etc/adns/config.toml").exists() {
            Some("/etc/adns/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub nameserver: Option<String>,
    pub query_timeout: Option<u64>,
    pub log_level: Option<String>,
}
