use fnet_application::ports::NetworkInterface;
use fnet_domain::config::NetifConfig;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Network interface whose addresses come from configuration.
#[derive(Debug, Clone)]
pub struct StaticNetif {
    config: NetifConfig,
}

impl StaticNetif {
    pub fn new(config: NetifConfig) -> Self {
        Self { config }
    }
}

impl NetworkInterface for StaticNetif {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn ip4_addr(&self) -> Option<Ipv4Addr> {
        self.config.ip4_addr
    }

    fn ip6_addr(&self, n: usize) -> Option<Ipv6Addr> {
        self.config.ip6_addr.get(n).copied()
    }

    fn ip4_dns(&self) -> Option<Ipv4Addr> {
        self.config.ip4_dns
    }

    fn ip6_dns(&self, n: usize) -> Option<Ipv6Addr> {
        self.config.ip6_dns.get(n).copied()
    }

    fn scope_id(&self) -> u32 {
        self.config.scope_id
    }
}
