mod resolver;
mod session;

pub use resolver::{DnsParams, DnsResolver, ResolvedHandler};
pub use session::{Addresses, DnsSession, ResolverState, SessionEvent};
