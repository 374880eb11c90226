use thiserror::Error;

/// Errors raised while setting up a client.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("base url cannot carry a path: {0}")]
    InvalidBaseUrl(String),
}

/// A failure reported by the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failed: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
