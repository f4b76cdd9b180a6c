use serde::{Deserialize, Serialize};

use crate::dns_message::MIN_MESSAGE_SIZE;

/// DNS resolver settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Server port used when the server address carries port 0.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds to wait for a response before retransmitting.
    #[serde(default = "default_retransmission_timeout_secs")]
    pub retransmission_timeout_secs: u64,

    /// Retransmissions after the first query before giving up.
    #[serde(default = "default_retransmission_max")]
    pub retransmission_max: u32,

    #[serde(default = "default_message_size")]
    pub message_size: usize,
}

impl DnsConfig {
    pub fn retransmission_timeout_ms(&self) -> u64 {
        self.retransmission_timeout_secs * 1000
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            retransmission_timeout_secs: default_retransmission_timeout_secs(),
            retransmission_max: default_retransmission_max(),
            message_size: default_message_size(),
        }
    }
}

fn default_port() -> u16 {
    53
}

fn default_retransmission_timeout_secs() -> u64 {
    4
}

fn default_retransmission_max() -> u32 {
    2
}

fn default_message_size() -> usize {
    MIN_MESSAGE_SIZE
}
