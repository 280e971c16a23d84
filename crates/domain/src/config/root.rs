use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::ConfigError;
use super::gateway::{GatewayConfig, GetPayloadFormat};
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use crate::UpstreamAddr;

/// Main configuration structure for Dohgate
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolution configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dohgate.toml in current directory
    /// 3. /etc/dohgate/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(upstream) = overrides.upstream {
            self.gateway.upstream = if upstream.is_empty() {
                None
            } else {
                Some(upstream)
            };
        }
        if let Some(timeout) = overrides.timeout {
            self.gateway.query_timeout_ms = timeout.as_millis() as u64;
        }
        if let Some(capacity) = overrides.cache_capacity {
            self.gateway.cache_capacity = capacity;
        }
        if overrides.verbose {
            self.gateway.verbose = true;
        }
        if let Some(format) = overrides.get_payload {
            self.gateway.get_payload = format;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than zero".to_string(),
            ));
        }

        if let Some(upstream) = &self.gateway.upstream {
            upstream
                .parse::<UpstreamAddr>()
                .map_err(|e| ConfigError::Validation(format!("upstream: {}", e)))?;
        } else {
            if self.gateway.nameservers.is_empty() {
                return Err(ConfigError::Validation(
                    "No upstream and no resolver nameservers configured".to_string(),
                ));
            }
            for server in &self.gateway.nameservers {
                server
                    .parse::<UpstreamAddr>()
                    .map_err(|e| ConfigError::Validation(format!("nameserver: {}", e)))?;
            }
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("dohgate.toml").exists() {
            Some("dohgate.toml".to_string())
        } else if std::path::Path::new("/etc/dohgate/config.toml").exists() {
            Some("/etc/dohgate/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    /// An empty string clears an upstream set in the file.
    pub upstream: Option<String>,
    pub timeout: Option<Duration>,
    pub cache_capacity: Option<usize>,
    pub verbose: bool,
    pub get_payload: Option<GetPayloadFormat>,
    pub log_level: Option<String>,
}
