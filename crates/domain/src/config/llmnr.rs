use serde::{Deserialize, Serialize};

use crate::dns_message::MIN_MESSAGE_SIZE;

/// LLMNR responder settings (RFC 4795).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmnrConfig {
    /// Responder instances that may run at once.
    #[serde(default = "default_max_instances")]
    pub max_instances: usize,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds a querier may cache the host name, used when an instance is
    /// started without its own TTL.
    #[serde(default = "default_hostname_ttl")]
    pub hostname_ttl: u32,

    #[serde(default = "default_message_size")]
    pub message_size: usize,
}

impl Default for LlmnrConfig {
    fn default() -> Self {
        Self {
            max_instances: default_max_instances(),
            port: default_port(),
            hostname_ttl: default_hostname_ttl(),
            message_size: default_message_size(),
        }
    }
}

fn default_max_instances() -> usize {
    1
}

fn default_port() -> u16 {
    5355
}

fn default_hostname_ttl() -> u32 {
    30
}

fn default_message_size() -> usize {
    MIN_MESSAGE_SIZE
}
