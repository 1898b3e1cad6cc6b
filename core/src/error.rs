//! Error types for the feed API client.
//!
//! # Design
//! `Display` output is the message shown to the user, so variants carry the
//! server's `message` verbatim where one exists. `NotFound` is separate from
//! `Server` because callers branch on it (post creation provisions a missing
//! user on 404).

use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error - Please check if the backend server is running";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Errors returned by `FeedClient` parse methods and the domain clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received at all.
    #[error("Network error - Please check if the backend server is running")]
    Network,

    /// The server returned 404.
    #[error("{message}")]
    NotFound { message: String },

    /// The server returned a non-2xx status other than 404.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Any failure that is neither a connection failure nor a server reply.
    #[error("An unexpected error occurred")]
    Unexpected,

    /// Input rejected before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// HTTP status for errors that came from a server reply.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures raised by a `Transport` before any response exists.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server could not be reached (refused, DNS, timeout, reset).
    #[error("connection failed: {0}")]
    Unreachable(String),

    /// The request could not be built or the reply could not be read.
    #[error("transport failure: {0}")]
    Other(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unreachable(_) => ApiError::Network,
            TransportError::Other(_) => ApiError::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_message_is_fixed() {
        let err: ApiError = TransportError::Unreachable("refused".to_string()).into();
        assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn other_transport_failure_is_unexpected() {
        let err: ApiError = TransportError::Other("bad uri".to_string()).into();
        assert!(matches!(err, ApiError::Unexpected));
        assert_eq!(err.to_string(), UNEXPECTED_ERROR_MESSAGE);
    }

    #[test]
    fn server_message_is_displayed_verbatim() {
        let err = ApiError::Server {
            status: 400,
            message: "Content too long".to_string(),
        };
        assert_eq!(err.to_string(), "Content too long");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_reports_404() {
        let err = ApiError::NotFound {
            message: "not found".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "not found");
    }
}
