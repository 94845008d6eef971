//! Connection port definition.

use crate::domain::errors::ConnectionResult;

/// Handle to the lobby connection as seen by the screen controller.
pub trait ConnectionPort: Send + Sync {
    /// Endpoint the connection was opened against.
    fn endpoint(&self) -> &str;

    /// Queues a text frame.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the frame cannot be handed to the transport.
    fn send_text(&self, text: &str) -> ConnectionResult<()>;

    /// Requests a graceful close.
    fn close(&self);
}
