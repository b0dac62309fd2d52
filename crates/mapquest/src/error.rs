//! MapQuest client error types

use thiserror::Error;

/// Errors that can occur during geocoding operations
#[derive(Debug, Error)]
pub enum MapQuestError {
    /// Caller input could not be normalized into a query
    ///
    /// Raised before any request is sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request reached the transport and failed there
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Client could not be built from the given configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl MapQuestError {
    /// Returns true if the error was raised while normalizing caller input
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Returns true if the error came from the network round trip
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Errors raised by the HTTP transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection to the geocoding service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Service answered with a non-success status
    #[error("Request failed: HTTP {status}")]
    HttpStatus {
        /// HTTP status code returned by the service
        status: u16,
    },

    /// Response body was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl TransportError {
    /// Returns the HTTP status code if the service answered with one
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}
