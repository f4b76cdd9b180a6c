//! Transition core of the resolver, free of sockets and timers.
//!
//! ```text
//!   Disabled --init--> Tx --sent--> Rx --answer/failure--> Release --> Disabled
//!                       ^            |
//!                       +--timeout---+
//! ```

use fnet_domain::dns_message::{write_question, AddressRecords, Header, HEADER_SIZE};
use fnet_domain::{DomainError, RecordType};
use smallvec::SmallVec;
use std::net::IpAddr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    Disabled,
    Tx,
    Rx,
    Release,
}

/// Something the session has to react to.
#[derive(Debug)]
pub enum SessionEvent<'a> {
    /// Result of sending the query.
    Sent(Result<usize, DomainError>),
    /// Nothing was pending; milliseconds since the query went out.
    Idle { elapsed_ms: u64 },
    Datagram(&'a [u8]),
    RecvFailed(DomainError),
}

pub type Addresses = SmallVec<[IpAddr; 4]>;

/// One resolution attempt: the query on the wire and what came back.
pub struct DnsSession {
    state: ResolverState,
    id: u16,
    record_type: RecordType,
    query: Vec<u8>,
    retries: u32,
    retransmission_timeout_ms: u64,
    retransmission_max: u32,
    addresses: Addresses,
}

impl DnsSession {
    /// Builds the query for `host_name` and starts in [`ResolverState::Tx`].
    pub fn new(
        id: u16,
        host_name: &str,
        record_type: RecordType,
        message_size: usize,
        retransmission_timeout_ms: u64,
        retransmission_max: u32,
    ) -> Result<Self, DomainError> {
        let mut query = vec![0u8; message_size];
        Header::query(id).write(&mut query)?;
        let question_len = write_question(&mut query, HEADER_SIZE, host_name, record_type)?;
        query.truncate(HEADER_SIZE + question_len);

        Ok(Self {
            state: ResolverState::Tx,
            id,
            record_type,
            query,
            retries: 0,
            retransmission_timeout_ms,
            retransmission_max,
            addresses: Addresses::new(),
        })
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    /// The encoded query, resent unchanged on every retransmission.
    pub fn query(&self) -> &[u8] {
        &self.query
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Addresses taken from the response; empty until one is accepted.
    pub fn addresses(&self) -> &[IpAddr] {
        &self.addresses
    }

    pub fn into_addresses(self) -> Addresses {
        self.addresses
    }

    /// Applies `event` and returns the new state. Events that do not belong
    /// to the current state leave it unchanged.
    pub fn handle(&mut self, event: SessionEvent<'_>) -> ResolverState {
        let next = match (self.state, event) {
            (ResolverState::Tx, SessionEvent::Sent(Ok(sent))) if sent == self.query.len() => {
                ResolverState::Rx
            }
            (ResolverState::Tx, SessionEvent::Sent(result)) => {
                debug!(id = self.id, result = ?result, "Query send failed");
                ResolverState::Release
            }
            (ResolverState::Rx, SessionEvent::Idle { elapsed_ms }) => self.on_idle(elapsed_ms),
            (ResolverState::Rx, SessionEvent::RecvFailed(e)) => {
                debug!(id = self.id, error = %e, "Receive failed");
                ResolverState::Release
            }
            (ResolverState::Rx, SessionEvent::Datagram(msg)) => self.on_datagram(msg),
            (state, _) => state,
        };

        if next != self.state {
            debug!(id = self.id, from = ?self.state, to = ?next, "Resolver state change");
        }
        self.state = next;
        next
    }

    fn on_idle(&mut self, elapsed_ms: u64) -> ResolverState {
        if elapsed_ms <= self.retransmission_timeout_ms {
            return ResolverState::Rx;
        }

        self.retries += 1;
        if self.retries > self.retransmission_max {
            debug!(id = self.id, retries = self.retries, "No response, giving up");
            ResolverState::Release
        } else {
            debug!(id = self.id, retries = self.retries, "No response, retransmitting");
            ResolverState::Tx
        }
    }

    fn on_datagram(&mut self, msg: &[u8]) -> ResolverState {
        let header = match Header::parse(msg) {
            Some(header) => header,
            None => {
                debug!(id = self.id, len = msg.len(), reason = "short", "Discarding datagram");
                return ResolverState::Rx;
            }
        };

        if header.id != self.id {
            debug!(id = self.id, got = header.id, reason = "id mismatch", "Discarding datagram");
            return ResolverState::Rx;
        }
        if !header.is_response() {
            debug!(id = self.id, reason = "not a response", "Discarding datagram");
            return ResolverState::Rx;
        }

        self.addresses.extend(AddressRecords::new(msg, self.record_type));
        debug!(
            id = self.id,
            rcode = header.rcode(),
            found = self.addresses.len(),
            "Response accepted"
        );
        ResolverState::Release
    }
}
