use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollConfig {
    /// Poll services that may be registered at once.
    #[serde(default = "default_max_services")]
    pub max_services: usize,

    /// Milliseconds between scheduler passes, also the clock tick period.
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_services: default_max_services(),
            period_ms: default_period_ms(),
        }
    }
}

fn default_max_services() -> usize {
    10
}

fn default_period_ms() -> u64 {
    10
}
