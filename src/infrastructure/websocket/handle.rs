use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use super::connection::{OutboundCommand, WebSocketConnection, WebSocketTransport, run_connection};
use crate::domain::{ConnectionError, ConnectionEvent, ConnectionPort, ConnectionResult};

/// Handle held by the screen controller. The transport itself lives in a
/// spawned driver task; the handle only queues frames for it.
pub struct WebSocketHandle {
    endpoint: String,
    command_tx: mpsc::UnboundedSender<OutboundCommand>,
}

impl WebSocketHandle {
    /// Opens a WebSocket connection to `endpoint`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(
        endpoint: impl Into<String>,
        connect_timeout: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<ConnectionEvent>) {
        Self::open_with(endpoint, Box::new(WebSocketConnection::new(connect_timeout)))
    }

    /// Opens a connection over an arbitrary transport.
    pub fn open_with(
        endpoint: impl Into<String>,
        transport: Box<dyn WebSocketTransport>,
    ) -> (Self, mpsc::UnboundedReceiver<ConnectionEvent>) {
        let endpoint = endpoint.into();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        debug!(endpoint = %endpoint, "Spawning connection task");
        tokio::spawn(run_connection(
            transport,
            endpoint.clone(),
            event_tx,
            command_rx,
        ));

        (
            Self {
                endpoint,
                command_tx,
            },
            event_rx,
        )
    }
}

impl ConnectionPort for WebSocketHandle {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send_text(&self, text: &str) -> ConnectionResult<()> {
        self.command_tx
            .send(OutboundCommand::Text(text.to_string()))
            .map_err(|_| ConnectionError::ChannelClosed)
    }

    fn close(&self) {
        let _ = self.command_tx.send(OutboundCommand::Close);
    }
}
