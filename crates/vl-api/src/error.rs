//! Error types for the vehicle cloud API

use thiserror::Error;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised by the vehicle cloud API collaborator
///
/// The split matters to callers: `InvalidCredentials` is a permanent setup
/// failure, everything else is surfaced per-command or per-cycle and may
/// clear on its own. The core never retries or refreshes credentials.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Could not reach the cloud service
    #[error("cloud connection failed: {0}")]
    ConnectionFailed(String),

    /// Account credentials were rejected
    #[error("invalid account credentials: {0}")]
    InvalidCredentials(String),

    /// The security PIN was rejected
    #[error("invalid PIN: {0}")]
    InvalidPin(String),

    /// The cloud accepted the request but the remote service failed
    #[error("remote service failure: {0}")]
    RemoteServiceFailure(String),

    /// The cloud does not know the requested VIN
    #[error("unknown vehicle: {0}")]
    VehicleNotFound(String),
}

impl ApiError {
    /// The human-readable message carried by this error
    pub fn message(&self) -> &str {
        match self {
            ApiError::ConnectionFailed(msg)
            | ApiError::InvalidCredentials(msg)
            | ApiError::InvalidPin(msg)
            | ApiError::RemoteServiceFailure(msg)
            | ApiError::VehicleNotFound(msg) => msg,
        }
    }
}
