use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Addresses of the network interface the services run on.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetifConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub ip4_addr: Option<Ipv4Addr>,

    #[serde(default)]
    pub ip6_addr: Vec<Ipv6Addr>,

    #[serde(default)]
    pub ip4_dns: Option<Ipv4Addr>,

    #[serde(default)]
    pub ip6_dns: Vec<Ipv6Addr>,

    /// IPv6 scope id (interface index) used for multicast membership.
    #[serde(default)]
    pub scope_id: u32,
}

impl Default for NetifConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            ip4_addr: None,
            ip6_addr: Vec::new(),
            ip4_dns: None,
            ip6_dns: Vec::new(),
            scope_id: 0,
        }
    }
}

fn default_name() -> String {
    "eth0".to_string()
}
