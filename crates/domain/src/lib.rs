//! FNET Domain Layer
pub mod address_family;
pub mod checksum;
pub mod config;
pub mod dns_message;
pub mod errors;
pub mod record_type;

pub use address_family::AddressFamily;
pub use config::{CliOverrides, Config};
pub use errors::DomainError;
pub use record_type::RecordType;
