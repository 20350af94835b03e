//! Error types for the workout service client

use thiserror::Error;

/// Failure of a single workout plan request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connect or request deadline exceeded
    #[error("request timed out")]
    Timeout,

    /// Service answered with a non-2xx status
    #[error("server returned {status}: {body}")]
    RemoteError { status: u16, body: String },

    /// Response body does not match the expected plan shape
    #[error("invalid response body: {0}")]
    DecodingError(String),

    /// DNS, connection refused, TLS and other network faults
    #[error("network error: {0}")]
    TransportError(String),
}

/// Coarse classification of a failure, kept next to the user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    Remote,
    Decoding,
    Transport,
    /// Fault raised outside the typed API channel
    Unexpected,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Timeout => ErrorKind::Timeout,
            ApiError::RemoteError { .. } => ErrorKind::Remote,
            ApiError::DecodingError(_) => ErrorKind::Decoding,
            ApiError::TransportError(_) => ErrorKind::Transport,
        }
    }

    /// User-facing description, empty when the error carries none
    pub fn detail(&self) -> String {
        match self {
            ApiError::DecodingError(msg) | ApiError::TransportError(msg)
                if msg.trim().is_empty() =>
            {
                String::new()
            }
            _ => self.to_string(),
        }
    }
}

/// Per-read timeouts surface as an io `TimedOut` somewhere in the source chain
fn is_timed_out(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<std::io::Error>() {
            if io_err.kind() == std::io::ErrorKind::TimedOut {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || is_timed_out(&err) {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::DecodingError(err.to_string())
        } else {
            ApiError::TransportError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::DecodingError(err.to_string())
    }
}
