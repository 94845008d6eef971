//! Connection lifecycle definitions.

use std::fmt;

/// Lifecycle state of the lobby connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Handshake in progress.
    #[default]
    Connecting,
    /// Frames can be sent.
    Open,
    /// Closed by either side.
    Closed,
    /// A transport error was reported.
    Errored,
}

impl ConnectionState {
    /// Returns true when outbound frames are accepted.
    #[must_use]
    pub const fn can_send(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => write!(f, "Connecting"),
            Self::Open => write!(f, "Open"),
            Self::Closed => write!(f, "Closed"),
            Self::Errored => write!(f, "Errored"),
        }
    }
}

/// Lifecycle notification emitted by the connection driver.
///
/// Events for one connection are delivered in order over a single channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The handshake completed.
    Open,
    /// The transport reported a failure.
    Error {
        /// Human readable cause.
        message: String,
    },
    /// The connection is gone.
    Closed {
        /// WebSocket close code.
        code: u16,
        /// Close reason, possibly empty.
        reason: String,
    },
    /// An inbound payload, untouched.
    Message(String),
}

impl ConnectionEvent {
    /// Creates an error event.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Creates a close event.
    #[must_use]
    pub fn closed(code: u16, reason: impl Into<String>) -> Self {
        Self::Closed {
            code,
            reason: reason.into(),
        }
    }

    /// State the connection is in after this event, if it changes it.
    #[must_use]
    pub const fn resulting_state(&self) -> Option<ConnectionState> {
        match self {
            Self::Open => Some(ConnectionState::Open),
            Self::Error { .. } => Some(ConnectionState::Errored),
            Self::Closed { .. } => Some(ConnectionState::Closed),
            Self::Message(_) => None,
        }
    }
}
