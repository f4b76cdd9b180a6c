mod clock;
mod netif;
mod poll_service;
mod transport;

pub use clock::Clock;
pub use netif::NetworkInterface;
pub use poll_service::{PollDesc, PollRegistry, PollService};
pub use transport::{DatagramSocket, SocketProvider};

use std::rc::Rc;

/// The stack services a protocol state machine runs on.
#[derive(Clone)]
pub struct NetStack {
    pub sockets: Rc<dyn SocketProvider>,
    pub poll: Rc<dyn PollRegistry>,
    pub clock: Rc<dyn Clock>,
}

impl NetStack {
    pub fn new(
        sockets: Rc<dyn SocketProvider>,
        poll: Rc<dyn PollRegistry>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            sockets,
            poll,
            clock,
        }
    }
}
