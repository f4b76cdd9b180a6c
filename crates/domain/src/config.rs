pub mod dns;
pub mod errors;
pub mod llmnr;
pub mod logging;
pub mod netif;
pub mod poll;
pub mod root;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use llmnr::LlmnrConfig;
pub use logging::LoggingConfig;
pub use netif::NetifConfig;
pub use poll::PollConfig;
pub use root::{CliOverrides, Config};
