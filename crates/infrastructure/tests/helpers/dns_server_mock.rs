#![allow(dead_code)]
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::thread::JoinHandle;
use std::time::Duration;

/// Answers DNS queries on loopback from a background thread.
pub struct MockDnsServer {
    addr: SocketAddr,
    handle: Option<JoinHandle<usize>>,
}

/// How the mock replies to each query.
#[derive(Clone, Copy)]
pub enum Behaviour {
    /// One A record carrying this address.
    Answer(Ipv4Addr),
    /// A reply with a wrong id, then the real answer.
    SpoofFirst(Ipv4Addr),
    Silent,
}

impl MockDnsServer {
    /// Serves up to `queries` queries, then exits.
    pub fn start(behaviour: Behaviour, queries: usize) -> std::io::Result<Self> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0)))?;
        socket.set_read_timeout(Some(Duration::from_secs(5)))?;
        let addr = socket.local_addr()?;

        let handle = std::thread::spawn(move || {
            let mut buf = [0u8; 512];
            let mut served = 0;
            while served < queries {
                let Ok((len, peer)) = socket.recv_from(&mut buf) else {
                    break;
                };
                served += 1;
                match behaviour {
                    Behaviour::Answer(ip) => {
                        let _ = socket.send_to(&Self::build_response(&buf[..len], ip), peer);
                    }
                    Behaviour::SpoofFirst(ip) => {
                        let mut spoofed =
                            Self::build_response(&buf[..len], Ipv4Addr::new(6, 6, 6, 6));
                        spoofed[1] ^= 0x5A;
                        let _ = socket.send_to(&spoofed, peer);
                        let _ = socket.send_to(&Self::build_response(&buf[..len], ip), peer);
                    }
                    Behaviour::Silent => {}
                }
            }
            served
        });

        Ok(Self {
            addr,
            handle: Some(handle),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Waits for the server thread and returns the queries it saw.
    pub fn join(mut self) -> usize {
        self.handle
            .take()
            .map(|h| h.join().unwrap_or(0))
            .unwrap_or(0)
    }

    fn build_response(query: &[u8], ip: Ipv4Addr) -> Vec<u8> {
        let mut response = query.to_vec();
        response[2] |= 0x80;
        response[3] |= 0x80;
        response[6..8].copy_from_slice(&1u16.to_be_bytes());
        response.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01]);
        response.extend_from_slice(&60u32.to_be_bytes());
        response.extend_from_slice(&4u16.to_be_bytes());
        response.extend_from_slice(&ip.octets());
        response
    }
}
