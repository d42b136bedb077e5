//! Error types for the HTTP client.
//!
//! # Design
//! Every failure is a value with a machine-readable code and a human-readable
//! message. Transport failures are carried through untouched inside
//! `ClientError::Transport`, so a caller can always recover exactly what the
//! transport reported.

use thiserror::Error;

/// A network-level failure reported by a `Transport` (DNS, connect, timeout, TLS).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct TransportError {
    pub code: String,
    pub message: String,
}

impl TransportError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Errors returned by `HttpClient` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The transport failed; the inner error is exactly what it returned.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The string dispatcher was handed a verb outside GET/POST/PUT/PATCH/DELETE.
    #[error("bad request: unsupported HTTP method `{0}`")]
    BadRequest(String),

    /// The envelope body could not be decoded into the requested type.
    #[error("the response from the request was invalid: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub const BAD_REQUEST: &'static str = "bad_request";
    pub const INVALID_RESPONSE: &'static str = "invalid_response";

    /// Machine-readable identifier for this error.
    pub fn code(&self) -> &str {
        match self {
            ClientError::Transport(e) => &e.code,
            ClientError::BadRequest(_) => Self::BAD_REQUEST,
            ClientError::InvalidResponse(_) => Self::INVALID_RESPONSE,
        }
    }

    /// Human-readable description, without the code prefix.
    pub fn message(&self) -> String {
        match self {
            ClientError::Transport(e) => e.message.clone(),
            other => other.to_string(),
        }
    }
}
