pub mod dns;
pub mod llmnr;

pub use dns::{DnsParams, DnsResolver, ResolvedHandler, ResolverState};
pub use llmnr::{LlmnrDesc, LlmnrParams, LlmnrServer, LlmnrState};
