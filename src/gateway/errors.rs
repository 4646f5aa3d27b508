//! Cart gateway errors.

use thiserror::Error;

/// Errors that can occur when talking to the cart endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Network unreachable, or a non-2xx response without a usable error
    /// payload.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server rejected the request with a message intended for display.
    #[error("{message}")]
    Rejected {
        /// Server-provided rejection message.
        message: String,
    },

    /// A 2xx response whose body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Malformed(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}
