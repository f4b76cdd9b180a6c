use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Service is already initialized: {0}")]
    AlreadyInitialized(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Service registration failed: {0}")]
    ServiceRegistrationFailed(String),

    #[error("Message needs {needed} bytes but the buffer holds {capacity}")]
    MessageTooLarge { needed: usize, capacity: usize },
}

impl DomainError {
    pub fn transport(context: &str, err: impl std::fmt::Display) -> Self {
        DomainError::TransportError(format!("{}: {}", context, err))
    }
}
