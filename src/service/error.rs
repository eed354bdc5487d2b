//! Error types for operation dispatch.
//!
//! These cover malformed requests only. Domain rejections (invalid tier,
//! missing record, bad credentials) are ordinary string results.

use thiserror::Error;

use crate::catalog::UnknownChannel;

#[derive(Debug, Error)]
pub enum HandlerError {
    /// No handler registered for this operation name.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    /// Argument decoding failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Guard rejected the operation (required arguments missing).
    #[error("missing required arguments for operation: {0}")]
    GuardRejected(String),
    /// No subscription channel with this name.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl From<UnknownChannel> for HandlerError {
    fn from(err: UnknownChannel) -> Self {
        HandlerError::UnknownChannel(err.0)
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownOperation(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::UnknownChannel(_) => 404,
        }
    }
}
