//! FNET Infrastructure Layer
//!
//! Adapters binding the application ports to the host: non-blocking UDP
//! sockets, a cooperative poll scheduler, a tick clock and a statically
//! configured network interface.
pub mod clock;
pub mod netif;
pub mod poll;
pub mod transport;

pub use clock::MonotonicClock;
pub use netif::StaticNetif;
pub use poll::PollScheduler;
pub use transport::{UdpDatagramSocket, UdpSocketProvider};
