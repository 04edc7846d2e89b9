use std::time::Duration;
use thiserror::Error;

/// Failures reported by the admin and producer/consumer collaborators.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("stream '{0}' already exists")]
    AlreadyExists(String),

    #[error("stream '{0}' not found")]
    NotFound(String),

    #[error("broker error: {0}")]
    Broker(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrokerError {
    /// Connection problems and timeouts may succeed when the user retries.
    pub fn is_transient(&self) -> bool {
        matches!(self, BrokerError::Connection(_) | BrokerError::Timeout(_))
    }
}
