use std::net::{Ipv4Addr, Ipv6Addr};

/// Address information of one network interface.
pub trait NetworkInterface {
    fn name(&self) -> &str;

    fn ip4_addr(&self) -> Option<Ipv4Addr>;

    /// The `n`-th IPv6 address bound to the interface.
    fn ip6_addr(&self, n: usize) -> Option<Ipv6Addr>;

    fn ip4_dns(&self) -> Option<Ipv4Addr>;

    fn ip6_dns(&self, n: usize) -> Option<Ipv6Addr>;

    /// IPv6 scope id (interface index).
    fn scope_id(&self) -> u32;
}
