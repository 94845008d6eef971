//! Connection error types.

use thiserror::Error;

use crate::domain::connection::ConnectionState;

/// Result alias for connection operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Connection error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConnectionError {
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("connection closed with code {code}: {reason}")]
    ConnectionClosed { code: u16, reason: String },

    #[error("websocket error: {message}")]
    WebSocket { message: String },

    #[error("timeout waiting for {operation}")]
    Timeout { operation: String },

    #[error("connection is not open (state: {state})")]
    NotOpen { state: ConnectionState },

    #[error("not connected")]
    NotConnected,

    #[error("connection task has stopped")]
    ChannelClosed,
}

impl ConnectionError {
    /// Creates connection failure error.
    #[must_use]
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    /// Creates websocket error.
    #[must_use]
    pub fn websocket(message: impl Into<String>) -> Self {
        Self::WebSocket {
            message: message.into(),
        }
    }

    /// Creates timeout error.
    #[must_use]
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }
}
