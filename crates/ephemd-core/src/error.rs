//! Shared error type across ephemd crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Referenced task id is not in the store.
    NotFound,
    /// A readiness dependency probe failed.
    NotReady,
    /// Invalid input / malformed request.
    BadRequest,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::NotReady => "NOT_READY",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, EphemdError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum EphemdError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("not ready: {0}")]
    NotReady(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl EphemdError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            EphemdError::NotFound(_) => ClientCode::NotFound,
            EphemdError::NotReady(_) => ClientCode::NotReady,
            EphemdError::BadRequest(_) => ClientCode::BadRequest,
            EphemdError::Internal(_) => ClientCode::Internal,
        }
    }
}
