use super::NetworkInterface;
use fnet_domain::{AddressFamily, DomainError};
use std::net::{IpAddr, SocketAddr};

/// Non-blocking UDP endpoint. The socket is closed when dropped.
pub trait DatagramSocket {
    fn connect(&self, addr: SocketAddr) -> Result<(), DomainError>;

    fn bind(&self, addr: SocketAddr) -> Result<(), DomainError>;

    /// Joins `group` on the given interface.
    fn join_multicast(&self, group: IpAddr, netif: &dyn NetworkInterface)
        -> Result<(), DomainError>;

    /// Multicast TTL (IPv4) or hop limit (IPv6) of outgoing datagrams.
    fn set_multicast_ttl(&self, ttl: u32) -> Result<(), DomainError>;

    /// Sends to the connected peer. Returns the octets accepted.
    fn send(&self, buf: &[u8]) -> Result<usize, DomainError>;

    /// Receives from the connected peer. `Ok(0)` when nothing is pending.
    fn recv(&self, buf: &mut [u8]) -> Result<usize, DomainError>;

    fn send_to(&self, buf: &[u8], addr: SocketAddr) -> Result<usize, DomainError>;

    /// `Ok(None)` when nothing is pending.
    fn recv_from(&self, buf: &mut [u8]) -> Result<Option<(usize, SocketAddr)>, DomainError>;
}

pub trait SocketProvider {
    fn open_udp(&self, family: AddressFamily) -> Result<Box<dyn DatagramSocket>, DomainError>;
}
