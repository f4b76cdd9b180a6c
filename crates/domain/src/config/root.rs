use serde::{Deserialize, Serialize};

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::llmnr::LlmnrConfig;
use super::logging::LoggingConfig;
use super::netif::NetifConfig;
use super::poll::PollConfig;
use crate::dns_message::MIN_MESSAGE_SIZE;

const DEFAULT_CONFIG_PATH: &str = "fnet.toml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// DNS resolver configuration
    #[serde(default)]
    pub dns: DnsConfig,

    /// LLMNR responder configuration
    #[serde(default)]
    pub llmnr: LlmnrConfig,

    /// Network interface the services are bound to
    #[serde(default)]
    pub netif: NetifConfig,

    /// Cooperative scheduler configuration
    #[serde(default)]
    pub poll: PollConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. fnet.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.dns.port = port;
        }
        if let Some(port) = overrides.llmnr_port {
            self.llmnr.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dns.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }
        if self.llmnr.port == 0 {
            return Err(ConfigError::Validation(
                "LLMNR port cannot be 0".to_string(),
            ));
        }
        if self.dns.message_size < MIN_MESSAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "DNS message size {} is below {}",
                self.dns.message_size, MIN_MESSAGE_SIZE
            )));
        }
        if self.llmnr.message_size < MIN_MESSAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "LLMNR message size {} is below {}",
                self.llmnr.message_size, MIN_MESSAGE_SIZE
            )));
        }
        if self.llmnr.max_instances == 0 {
            return Err(ConfigError::Validation(
                "At least one LLMNR instance is required".to_string(),
            ));
        }
        if self.poll.max_services == 0 || self.poll.period_ms == 0 {
            return Err(ConfigError::Validation(
                "Poll scheduler needs services and a non-zero period".to_string(),
            ));
        }
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub llmnr_port: Option<u16>,
    pub log_level: Option<String>,
}
