//! Non-blocking UDP sockets (RFC 768) for the protocol state machines.
//!
//! Sockets are created through socket2 so address reuse and non-blocking
//! mode are set before the first bind, then driven as std sockets.

use fnet_application::ports::{DatagramSocket, NetworkInterface, SocketProvider};
use fnet_domain::{AddressFamily, DomainError};
use socket2::{Domain, Protocol, SockRef, Socket, Type};
use std::io;
use std::net::{IpAddr, SocketAddr, UdpSocket};
use tracing::debug;

/// Opens [`UdpDatagramSocket`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpSocketProvider;

impl UdpSocketProvider {
    pub fn new() -> Self {
        Self
    }
}

impl SocketProvider for UdpSocketProvider {
    fn open_udp(&self, family: AddressFamily) -> Result<Box<dyn DatagramSocket>, DomainError> {
        let socket = UdpDatagramSocket::open(family)
            .map_err(|e| DomainError::transport("Failed to create UDP socket", e))?;
        Ok(Box::new(socket))
    }
}

pub struct UdpDatagramSocket {
    socket: UdpSocket,
    family: AddressFamily,
}

impl UdpDatagramSocket {
    pub fn open(family: AddressFamily) -> io::Result<Self> {
        let domain = match family {
            AddressFamily::Inet => Domain::IPV4,
            AddressFamily::Inet6 => Domain::IPV6,
        };

        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
        // Several responders may listen on the LLMNR port.
        socket.set_reuse_address(true)?;
        if family == AddressFamily::Inet6 {
            socket.set_only_v6(true)?;
        }
        socket.set_nonblocking(true)?;

        debug!(family = %family, "UDP socket opened");
        Ok(Self {
            socket: socket.into(),
            family,
        })
    }
}

fn would_block(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::WouldBlock
}

impl DatagramSocket for UdpDatagramSocket {
    fn connect(&self, addr: SocketAddr) -> Result<(), DomainError> {
        self.socket
            .connect(addr)
            .map_err(|e| DomainError::transport(&format!("Failed to connect to {}", addr), e))
    }

    fn bind(&self, addr: SocketAddr) -> Result<(), DomainError> {
        SockRef::from(&self.socket)
            .bind(&addr.into())
            .map_err(|e| DomainError::transport(&format!("Failed to bind {}", addr), e))
    }

    fn join_multicast(
        &self,
        group: IpAddr,
        netif: &dyn NetworkInterface,
    ) -> Result<(), DomainError> {
        let joined = match group {
            IpAddr::V4(group) => {
                let iface = netif.ip4_addr().unwrap_or(std::net::Ipv4Addr::UNSPECIFIED);
                self.socket.join_multicast_v4(&group, &iface)
            }
            IpAddr::V6(group) => self.socket.join_multicast_v6(&group, netif.scope_id()),
        };
        joined.map_err(|e| {
            DomainError::transport(
                &format!("Failed to join {} on {}", group, netif.name()),
                e,
            )
        })
    }

    fn set_multicast_ttl(&self, ttl: u32) -> Result<(), DomainError> {
        let set = match self.family {
            AddressFamily::Inet => self.socket.set_multicast_ttl_v4(ttl),
            AddressFamily::Inet6 => SockRef::from(&self.socket).set_multicast_hops_v6(ttl),
        };
        set.map_err(|e| DomainError::transport("Failed to set multicast TTL", e))
    }

    fn send(&self, buf: &[u8]) -> Result<usize, DomainError> {
        match self.socket.send(buf) {
            Ok(sent) => Ok(sent),
            Err(e) if would_block(&e) => Ok(0),
            Err(e) => Err(DomainError::transport("UDP send failed", e)),
        }
    }

    fn recv(&self, buf: &mut [u8]) -> Result<usize, DomainError> {
        match self.socket.recv(buf) {
            Ok(received) => Ok(received),
            Err(e) if would_block(&e) => Ok(0),
            Err(e) => Err(DomainError::transport("UDP receive failed", e)),
        }
    }

    fn send_to(&self, buf: &[u8], addr: SocketAddr) -> Result<usize, DomainError> {
        match self.socket.send_to(buf, addr) {
            Ok(sent) => Ok(sent),
            Err(e) if would_block(&e) => Ok(0),
            Err(e) => Err(DomainError::transport(&format!("UDP send to {} failed", addr), e)),
        }
    }

    fn recv_from(&self, buf: &mut [u8]) -> Result<Option<(usize, SocketAddr)>, DomainError> {
        match self.socket.recv_from(buf) {
            Ok(datagram) => Ok(Some(datagram)),
            Err(e) if would_block(&e) => Ok(None),
            Err(e) => Err(DomainError::transport("UDP receive failed", e)),
        }
    }
}
