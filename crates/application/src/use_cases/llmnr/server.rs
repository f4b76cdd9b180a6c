use super::responder::answer_query;
use crate::ports::{DatagramSocket, NetStack, NetworkInterface, PollDesc, PollService};
use fnet_domain::config::LlmnrConfig;
use fnet_domain::dns_message::MAX_NAME_LEN;
use fnet_domain::{AddressFamily, DomainError, RecordType};
use smallvec::{smallvec, SmallVec};
use std::cell::RefCell;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// IPv4 link-scope multicast address (RFC 4795 §2).
pub const LLMNR_IP4_GROUP: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 252);
/// IPv6 link-scope multicast address (RFC 4795 §2).
pub const LLMNR_IP6_GROUP: Ipv6Addr = Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 1, 3);
/// TTL / hop limit of outgoing datagrams, RFC 4795 §2.5 recommends 255.
pub const LLMNR_MULTICAST_TTL: u32 = 255;

/// Input parameters for [`LlmnrServer::init`].
pub struct LlmnrParams {
    /// Interface to listen on and whose addresses are announced.
    pub netif: Rc<dyn NetworkInterface>,
    pub host_name: String,
    /// Seconds a querier may cache the answer. 0 selects the configured
    /// default.
    pub host_name_ttl: u32,
    /// Family to listen on. Both IPv4 and IPv6 when not given.
    pub addr_family: Option<AddressFamily>,
}

/// Handle of a running responder instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LlmnrDesc(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmnrState {
    Disabled,
    WaitingRequest,
}

/// Fixed pool of LLMNR responder instances.
pub struct LlmnrServer {
    stack: NetStack,
    config: LlmnrConfig,
    slots: Vec<Rc<LlmnrInstance>>,
}

struct LlmnrInstance {
    index: usize,
    active: RefCell<Option<Responder>>,
    message: RefCell<Vec<u8>>,
}

/// One listening socket per family.
type Listeners = SmallVec<[Box<dyn DatagramSocket>; 2]>;

struct Responder {
    sockets: Listeners,
    poll_desc: PollDesc,
    netif: Rc<dyn NetworkInterface>,
    host_name: String,
    host_name_ttl: u32,
}

impl LlmnrServer {
    pub fn new(stack: NetStack, config: LlmnrConfig) -> Self {
        let slots = (0..config.max_instances)
            .map(|index| {
                Rc::new(LlmnrInstance {
                    index,
                    active: RefCell::new(None),
                    message: RefCell::new(vec![0u8; config.message_size]),
                })
            })
            .collect();

        Self {
            stack,
            config,
            slots,
        }
    }

    /// Starts a responder for `params.host_name` in the first free slot.
    pub fn init(&self, params: LlmnrParams) -> Result<LlmnrDesc, DomainError> {
        if params.host_name.is_empty() || params.host_name.len() >= MAX_NAME_LEN {
            warn!(host = %params.host_name, "LLMNR init rejected: bad host name length");
            return Err(DomainError::InvalidParameter(format!(
                "host name must be 1..{} octets",
                MAX_NAME_LEN
            )));
        }

        let instance = self
            .slots
            .iter()
            .find(|slot| slot.active.borrow().is_none())
            .ok_or_else(|| {
                warn!(host = %params.host_name, "LLMNR init rejected: no free instance");
                DomainError::AlreadyInitialized("no free LLMNR instance".to_string())
            })?;

        let families: SmallVec<[AddressFamily; 2]> = match params.addr_family {
            Some(family) => smallvec![family],
            None => smallvec![AddressFamily::Inet, AddressFamily::Inet6],
        };
        let host_name_ttl = match params.host_name_ttl {
            0 => self.config.hostname_ttl,
            ttl => ttl,
        };

        let sockets = families
            .iter()
            .map(|&family| self.open_listener(family, params.netif.as_ref()))
            .collect::<Result<Listeners, _>>()
            .inspect_err(|e| warn!(netif = params.netif.name(), error = %e, "LLMNR init failed"))?;

        let poll_desc = self
            .stack
            .poll
            .register(instance.clone() as Rc<dyn PollService>)
            .inspect_err(|e| warn!(error = %e, "LLMNR init failed: poll registration"))?;

        info!(
            host = %params.host_name,
            netif = params.netif.name(),
            families = ?families,
            ttl = host_name_ttl,
            slot = instance.index,
            "LLMNR responder started"
        );

        *instance.active.borrow_mut() = Some(Responder {
            sockets,
            poll_desc,
            netif: params.netif,
            host_name: params.host_name,
            host_name_ttl,
        });

        Ok(LlmnrDesc(instance.index))
    }

    fn open_listener(
        &self,
        family: AddressFamily,
        netif: &dyn NetworkInterface,
    ) -> Result<Box<dyn DatagramSocket>, DomainError> {
        let socket = self.stack.sockets.open_udp(family)?;
        socket.bind(SocketAddr::new(family.unspecified(), self.config.port))?;

        let group = match family {
            AddressFamily::Inet => IpAddr::V4(LLMNR_IP4_GROUP),
            AddressFamily::Inet6 => IpAddr::V6(LLMNR_IP6_GROUP),
        };
        socket.join_multicast(group, netif)?;

        // Not fatal: queriers accept any TTL.
        if let Err(e) = socket.set_multicast_ttl(LLMNR_MULTICAST_TTL) {
            warn!(error = %e, "Failed to set LLMNR multicast TTL");
        }

        Ok(socket)
    }

    /// Stops the responder in `desc`. Releasing a stopped one does nothing.
    pub fn release(&self, desc: LlmnrDesc) {
        let Some(instance) = self.slots.get(desc.0) else {
            return;
        };
        if let Some(responder) = instance.active.borrow_mut().take() {
            self.stack.poll.unregister(responder.poll_desc);
            info!(host = %responder.host_name, slot = desc.0, "LLMNR responder released");
        }
    }

    pub fn state(&self, desc: LlmnrDesc) -> LlmnrState {
        match self.slots.get(desc.0) {
            Some(instance) if instance.active.borrow().is_some() => LlmnrState::WaitingRequest,
            _ => LlmnrState::Disabled,
        }
    }

    /// True when `desc` names a running responder.
    pub fn enabled(&self, desc: Option<LlmnrDesc>) -> bool {
        desc.is_some_and(|desc| self.state(desc) != LlmnrState::Disabled)
    }
}

impl Drop for LlmnrServer {
    fn drop(&mut self) {
        for index in 0..self.slots.len() {
            self.release(LlmnrDesc(index));
        }
    }
}

fn interface_address(netif: &dyn NetworkInterface, rtype: RecordType) -> Option<IpAddr> {
    match rtype {
        RecordType::A => netif.ip4_addr().map(IpAddr::V4),
        RecordType::AAAA => netif.ip6_addr(0).map(IpAddr::V6),
    }
}

impl PollService for LlmnrInstance {
    fn poll(&self) {
        let active = self.active.borrow();
        let Some(responder) = active.as_ref() else {
            return;
        };
        let mut msg = self.message.borrow_mut();

        for socket in &responder.sockets {
            self.serve(responder, socket.as_ref(), &mut msg);
        }
    }
}

impl LlmnrInstance {
    /// Answers at most one pending datagram on `socket`.
    fn serve(&self, responder: &Responder, socket: &dyn DatagramSocket, msg: &mut [u8]) {
        let (received, from) = match socket.recv_from(msg) {
            Ok(Some(datagram)) => datagram,
            Ok(None) => return,
            Err(e) => {
                warn!(slot = self.index, error = %e, "LLMNR receive failed");
                return;
            }
        };

        let answer = answer_query(
            msg,
            received,
            &responder.host_name,
            responder.host_name_ttl,
            |rtype| interface_address(responder.netif.as_ref(), rtype),
        );

        match answer {
            Ok(len) => match socket.send_to(&msg[..len], from) {
                Ok(0) => debug!(to = %from, "LLMNR answer dropped: socket not ready"),
                Ok(_) => debug!(to = %from, host = %responder.host_name, "LLMNR answer sent"),
                Err(e) => warn!(to = %from, error = %e, "LLMNR answer send failed"),
            },
            Err(reason) => debug!(from = %from, %reason, "Discarding LLMNR datagram"),
        }
    }
}
