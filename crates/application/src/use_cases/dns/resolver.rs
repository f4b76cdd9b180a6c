use super::session::{Addresses, DnsSession, ResolverState, SessionEvent};
use crate::ports::{DatagramSocket, NetStack, PollDesc, PollService};
use fnet_domain::config::DnsConfig;
use fnet_domain::dns_message::MAX_NAME_LEN;
use fnet_domain::{AddressFamily, DomainError};
use std::cell::{Cell, RefCell};
use std::net::{IpAddr, SocketAddr};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Called once per resolution with the requested family and the resolved
/// addresses. An empty slice means the resolution failed.
pub type ResolvedHandler = Box<dyn FnOnce(AddressFamily, &[IpAddr])>;

/// Input parameters for [`DnsResolver::init`].
pub struct DnsParams {
    /// Family of the addresses asked for (A or AAAA query).
    pub addr_family: AddressFamily,
    /// DNS server. Port 0 selects the configured DNS port.
    pub server: SocketAddr,
    pub host_name: String,
    pub handler: ResolvedHandler,
}

/// DNS client resolving one host name at a time.
///
/// The resolver registers itself with the poll scheduler for the duration
/// of a resolution and reports the outcome through the handler given to
/// [`DnsResolver::init`]. Dropping it cancels any resolution in flight.
pub struct DnsResolver {
    inner: Rc<ResolverInner>,
}

struct ResolverInner {
    stack: NetStack,
    config: DnsConfig,
    next_id: Cell<u16>,
    active: RefCell<Option<Resolution>>,
}

struct Resolution {
    session: DnsSession,
    family: AddressFamily,
    socket: Box<dyn DatagramSocket>,
    poll_desc: PollDesc,
    handler: ResolvedHandler,
    last_send: u32,
    rx_buf: Vec<u8>,
}

impl DnsResolver {
    pub fn new(stack: NetStack, config: DnsConfig) -> Self {
        Self {
            inner: Rc::new(ResolverInner {
                stack,
                config,
                next_id: Cell::new(fastrand::u16(..)),
                active: RefCell::new(None),
            }),
        }
    }

    /// Starts resolving `params.host_name`.
    pub fn init(&self, params: DnsParams) -> Result<(), DomainError> {
        let inner = &self.inner;

        if params.host_name.is_empty() || params.host_name.len() >= MAX_NAME_LEN {
            warn!(host = %params.host_name, "DNS init rejected: bad host name length");
            return Err(DomainError::InvalidParameter(format!(
                "host name must be 1..{} octets",
                MAX_NAME_LEN
            )));
        }
        if params.server.ip().is_unspecified() {
            warn!("DNS init rejected: server address is unspecified");
            return Err(DomainError::InvalidParameter(
                "DNS server address is unspecified".to_string(),
            ));
        }
        if inner.active.borrow().is_some() {
            warn!(host = %params.host_name, "DNS init rejected: resolution in progress");
            return Err(DomainError::AlreadyInitialized(
                "a DNS resolution is already in progress".to_string(),
            ));
        }

        let mut server = params.server;
        if server.port() == 0 {
            server.set_port(inner.config.port);
        }

        let socket = inner
            .stack
            .sockets
            .open_udp(AddressFamily::of(&server.ip()))
            .inspect_err(|e| warn!(error = %e, "DNS init failed: socket"))?;
        socket
            .connect(server)
            .inspect_err(|e| warn!(server = %server, error = %e, "DNS init failed: connect"))?;

        let id = inner.next_id.get().wrapping_add(1);
        inner.next_id.set(id);

        let session = DnsSession::new(
            id,
            &params.host_name,
            params.addr_family.record_type(),
            inner.config.message_size,
            inner.config.retransmission_timeout_ms(),
            inner.config.retransmission_max,
        )?;

        let poll_desc = inner
            .stack
            .poll
            .register(self.inner.clone() as Rc<dyn PollService>)
            .inspect_err(|e| warn!(error = %e, "DNS init failed: poll registration"))?;

        *inner.active.borrow_mut() = Some(Resolution {
            session,
            family: params.addr_family,
            socket,
            poll_desc,
            handler: params.handler,
            last_send: inner.stack.clock.ticks(),
            rx_buf: vec![0u8; inner.config.message_size],
        });

        info!(
            host = %params.host_name,
            server = %server,
            family = %params.addr_family,
            id,
            "DNS resolution started"
        );
        Ok(())
    }

    /// Aborts the resolution in flight, if any. The handler is not called.
    pub fn release(&self) {
        if let Some(resolution) = self.inner.active.borrow_mut().take() {
            self.inner.stack.poll.unregister(resolution.poll_desc);
            info!(id = resolution.session.id(), "DNS resolution released");
        }
    }

    pub fn state(&self) -> ResolverState {
        self.inner.state()
    }
}

impl Drop for DnsResolver {
    fn drop(&mut self) {
        self.release();
    }
}

impl ResolverInner {
    fn state(&self) -> ResolverState {
        self.active
            .borrow()
            .as_ref()
            .map_or(ResolverState::Disabled, |r| r.session.state())
    }

    fn step(&self, r: &mut Resolution) {
        match r.session.state() {
            ResolverState::Tx => {
                let sent = r.socket.send(r.session.query());
                if r.session.handle(SessionEvent::Sent(sent)) == ResolverState::Rx {
                    r.last_send = self.stack.clock.ticks();
                }
            }
            ResolverState::Rx => {
                let event = match r.socket.recv(&mut r.rx_buf) {
                    Ok(0) => SessionEvent::Idle {
                        elapsed_ms: self.stack.clock.elapsed_ms(r.last_send),
                    },
                    Ok(received) => SessionEvent::Datagram(&r.rx_buf[..received]),
                    Err(e) => {
                        warn!(id = r.session.id(), error = %e, "DNS receive failed");
                        SessionEvent::RecvFailed(e)
                    }
                };
                r.session.handle(event);
            }
            ResolverState::Disabled | ResolverState::Release => {}
        }
    }

    /// Closes and unregisters a finished resolution, then reports it.
    fn complete(&self, r: Resolution) {
        self.stack.poll.unregister(r.poll_desc);
        drop(r.socket);

        let id = r.session.id();
        let addresses: Addresses = r.session.into_addresses();
        if addresses.is_empty() {
            info!(id, "DNS resolution failed");
        } else {
            info!(id, count = addresses.len(), "DNS resolution complete");
        }

        (r.handler)(r.family, &addresses);
    }
}

impl PollService for ResolverInner {
    fn poll(&self) {
        let finished = {
            let mut active = self.active.borrow_mut();
            let release = match active.as_mut() {
                Some(r) if r.session.state() == ResolverState::Release => true,
                Some(r) => {
                    self.step(r);
                    false
                }
                None => {
                    debug!("DNS poll with no resolution");
                    false
                }
            };
            if release {
                active.take()
            } else {
                None
            }
        };

        // The handler runs with the resolver already disabled so it may
        // start the next resolution.
        if let Some(r) = finished {
            self.complete(r);
        }
    }
}
