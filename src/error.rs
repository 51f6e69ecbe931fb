//! Transfer error types

use thiserror::Error;

/// Failure reported by a transport (network, DNS, TLS, rejected header, bad address).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Abort reported by a transport, or a transport that went away without settling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct AbortEvent {
    pub reason: String,
}

impl AbortEvent {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Rejection reason of an upload or download.
///
/// Non-2xx responses are not errors: they resolve with `ok == false`.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("transfer failed: {0}")]
    Transport(#[from] TransportError),
    #[error("transfer aborted: {0}")]
    Aborted(#[from] AbortEvent),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("invalid transport configuration: {0}")]
    Config(String),
}

impl TransferError {
    pub fn is_abort(&self) -> bool {
        matches!(self, TransferError::Aborted(_))
    }
}
