#![allow(dead_code)]

use fnet_application::ports::{
    Clock, DatagramSocket, NetStack, NetworkInterface, PollDesc, PollRegistry, PollService,
    SocketProvider,
};
use fnet_domain::{AddressFamily, DomainError};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::rc::Rc;

/// Everything one mock socket saw, shared with the test.
#[derive(Default)]
pub struct SocketLog {
    pub family: Option<AddressFamily>,
    pub connected: Option<SocketAddr>,
    pub bound: Option<SocketAddr>,
    pub joined: Vec<IpAddr>,
    pub multicast_ttl: Option<u32>,
    pub sent: Vec<(Vec<u8>, Option<SocketAddr>)>,
    pub inbound: VecDeque<Result<(Vec<u8>, SocketAddr), DomainError>>,
    /// Octets `send` reports when set, to simulate short writes.
    pub send_limit: Option<usize>,
    pub fail_send: bool,
    pub closed: bool,
}

pub type SharedLog = Rc<RefCell<SocketLog>>;

pub struct MockSocket {
    log: SharedLog,
}

impl MockSocket {
    fn pop_inbound(&self) -> Option<Result<(Vec<u8>, SocketAddr), DomainError>> {
        self.log.borrow_mut().inbound.pop_front()
    }
}

impl Drop for MockSocket {
    fn drop(&mut self) {
        self.log.borrow_mut().closed = true;
    }
}

impl DatagramSocket for MockSocket {
    fn connect(&self, addr: SocketAddr) -> Result<(), DomainError> {
        self.log.borrow_mut().connected = Some(addr);
        Ok(())
    }

    fn bind(&self, addr: SocketAddr) -> Result<(), DomainError> {
        self.log.borrow_mut().bound = Some(addr);
        Ok(())
    }

    fn join_multicast(
        &self,
        group: IpAddr,
        _netif: &dyn NetworkInterface,
    ) -> Result<(), DomainError> {
        self.log.borrow_mut().joined.push(group);
        Ok(())
    }

    fn set_multicast_ttl(&self, ttl: u32) -> Result<(), DomainError> {
        self.log.borrow_mut().multicast_ttl = Some(ttl);
        Ok(())
    }

    fn send(&self, buf: &[u8]) -> Result<usize, DomainError> {
        let mut log = self.log.borrow_mut();
        if log.fail_send {
            return Err(DomainError::TransportError("send refused".to_string()));
        }
        log.sent.push((buf.to_vec(), None));
        Ok(log.send_limit.unwrap_or(buf.len()).min(buf.len()))
    }

    fn recv(&self, buf: &mut [u8]) -> Result<usize, DomainError> {
        match self.pop_inbound() {
            None => Ok(0),
            Some(Ok((data, _))) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                Ok(n)
            }
            Some(Err(e)) => Err(e),
        }
    }

    fn send_to(&self, buf: &[u8], addr: SocketAddr) -> Result<usize, DomainError> {
        let mut log = self.log.borrow_mut();
        log.sent.push((buf.to_vec(), Some(addr)));
        Ok(log.send_limit.unwrap_or(buf.len()).min(buf.len()))
    }

    fn recv_from(&self, buf: &mut [u8]) -> Result<Option<(usize, SocketAddr)>, DomainError> {
        match self.pop_inbound() {
            None => Ok(None),
            Some(Ok((data, from))) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                Ok(Some((n, from)))
            }
            Some(Err(e)) => Err(e),
        }
    }
}

/// Hands out mock sockets and keeps their logs.
#[derive(Default)]
pub struct MockSockets {
    pub opened: RefCell<Vec<SharedLog>>,
    pub fail_open: Cell<bool>,
}

impl MockSockets {
    pub fn last(&self) -> SharedLog {
        self.opened.borrow().last().cloned().expect("no socket opened")
    }
}

impl SocketProvider for MockSockets {
    fn open_udp(&self, family: AddressFamily) -> Result<Box<dyn DatagramSocket>, DomainError> {
        if self.fail_open.get() {
            return Err(DomainError::TransportError("no sockets left".to_string()));
        }
        let log = Rc::new(RefCell::new(SocketLog {
            family: Some(family),
            ..SocketLog::default()
        }));
        self.opened.borrow_mut().push(log.clone());
        Ok(Box::new(MockSocket { log }))
    }
}

/// Registry stepping services by hand.
pub struct MockRegistry {
    slots: RefCell<Vec<Option<Rc<dyn PollService>>>>,
}

impl MockRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: RefCell::new(vec![None; capacity]),
        }
    }

    pub fn registered(&self) -> usize {
        self.slots.borrow().iter().filter(|s| s.is_some()).count()
    }

    /// Polls every registered service once.
    pub fn run_pass(&self) {
        let len = self.slots.borrow().len();
        for i in 0..len {
            let service = self.slots.borrow()[i].clone();
            if let Some(service) = service {
                service.poll();
            }
        }
    }
}

impl PollRegistry for MockRegistry {
    fn register(&self, service: Rc<dyn PollService>) -> Result<PollDesc, DomainError> {
        let mut slots = self.slots.borrow_mut();
        let free = slots.iter().position(|s| s.is_none()).ok_or_else(|| {
            DomainError::ServiceRegistrationFailed("registry full".to_string())
        })?;
        slots[free] = Some(service);
        Ok(PollDesc(free))
    }

    fn unregister(&self, desc: PollDesc) {
        if let Some(slot) = self.slots.borrow_mut().get_mut(desc.0) {
            *slot = None;
        }
    }
}

pub struct ManualClock {
    ticks: Cell<u32>,
    period_ms: u64,
}

impl ManualClock {
    pub fn new(period_ms: u64) -> Self {
        Self {
            ticks: Cell::new(0),
            period_ms,
        }
    }

    pub fn set_ticks(&self, ticks: u32) {
        self.ticks.set(ticks);
    }

    pub fn advance_ms(&self, ms: u64) {
        let ticks = (ms / self.period_ms) as u32;
        self.ticks.set(self.ticks.get().wrapping_add(ticks));
    }
}

impl Clock for ManualClock {
    fn ticks(&self) -> u32 {
        self.ticks.get()
    }

    fn period_ms(&self) -> u64 {
        self.period_ms
    }
}

#[derive(Default)]
pub struct StubNetif {
    pub ip4: Option<Ipv4Addr>,
    pub ip6: Vec<Ipv6Addr>,
    pub ip4_dns: Option<Ipv4Addr>,
    pub ip6_dns: Vec<Ipv6Addr>,
}

impl NetworkInterface for StubNetif {
    fn name(&self) -> &str {
        "stub0"
    }

    fn ip4_addr(&self) -> Option<Ipv4Addr> {
        self.ip4
    }

    fn ip6_addr(&self, n: usize) -> Option<Ipv6Addr> {
        self.ip6.get(n).copied()
    }

    fn ip4_dns(&self) -> Option<Ipv4Addr> {
        self.ip4_dns
    }

    fn ip6_dns(&self, n: usize) -> Option<Ipv6Addr> {
        self.ip6_dns.get(n).copied()
    }

    fn scope_id(&self) -> u32 {
        1
    }
}

/// Mock stack plus typed handles on its parts.
pub struct TestStack {
    pub sockets: Rc<MockSockets>,
    pub registry: Rc<MockRegistry>,
    pub clock: Rc<ManualClock>,
}

impl TestStack {
    pub fn new() -> Self {
        Self {
            sockets: Rc::new(MockSockets::default()),
            registry: Rc::new(MockRegistry::new(4)),
            clock: Rc::new(ManualClock::new(10)),
        }
    }

    pub fn net_stack(&self) -> NetStack {
        NetStack::new(
            self.sockets.clone(),
            self.registry.clone(),
            self.clock.clone(),
        )
    }
}
