//! Error types for the OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// OpenAI client errors.
///
/// Each request can fail in exactly one of three ways beyond configuration:
/// the connection never completed ([`ClientError::Transport`]), the server
/// answered with a non-2xx status ([`ClientError::Status`]), or the body
/// could not be decoded into the expected shape ([`ClientError::Parse`]).
/// No retries happen at this layer; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error (missing API key, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport error (connection failed, timeout elapsed)
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx HTTP response, carrying the status code
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Parse error (invalid JSON, or JSON lacking the expected shape)
    #[error("parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// True for connection/timeout failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// HTTP status code, if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = ClientError::Status {
            status: 429,
            message: "rate limited".into(),
        };
        assert_eq!(err.status(), Some(429));
        assert!(!err.is_transport());

        let err = ClientError::Transport("connection refused".into());
        assert_eq!(err.status(), None);
        assert!(err.is_transport());
    }

    #[test]
    fn test_display_carries_status() {
        let err = ClientError::Status {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.to_string().contains("503"));
    }
}
