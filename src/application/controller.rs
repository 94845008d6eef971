//! Screen controller: the lobby's single stateful component.

use tracing::{debug, warn};

use crate::domain::{
    ConnectControl, ConnectionError, ConnectionEvent, ConnectionPort, ConnectionResult,
    ConnectionState, DiagnosticLog, Panel, ScreenRegistry,
};

/// Screen shown after the connect button is clicked.
pub const WAITING_SCREEN: &str = "waitingScreen";

/// Frame pushed to the server by [`ScreenController::message`].
pub const TRANSFORM_MESSAGE: &str = "transform";

/// Owns the connection handle, the screen registry, the connect control and
/// the diagnostic output.
pub struct ScreenController<P, C> {
    registry: ScreenRegistry<P>,
    connection: Option<C>,
    connection_state: ConnectionState,
    connect_control: ConnectControl,
    diagnostics: DiagnosticLog,
}

impl<P: Panel, C: ConnectionPort> ScreenController<P, C> {
    /// Sets the controller up from an already opened connection and the
    /// panels supplied by the UI layer.
    ///
    /// The connect control starts gated on an empty name field.
    pub fn initialize<I>(connection: Option<C>, panels: I) -> Self
    where
        I: IntoIterator<Item = P>,
    {
        let registry = ScreenRegistry::from_panels(panels);
        let connection_state = if connection.is_some() {
            ConnectionState::Connecting
        } else {
            ConnectionState::Closed
        };

        if let Some(conn) = &connection {
            debug!(endpoint = conn.endpoint(), "Connection attached");
        }
        debug!(screens = ?registry.ids(), "Screen registry built");

        let mut controller = Self {
            registry,
            connection,
            connection_state,
            connect_control: ConnectControl::new(),
            diagnostics: DiagnosticLog::new(),
        };
        controller.handle_text_input_change("");
        controller
    }

    /// Dispatches one connection lifecycle event.
    pub fn handle_connection_event(&mut self, event: ConnectionEvent) {
        if let Some(state) = event.resulting_state() {
            self.connection_state = state;
        }

        match event {
            ConnectionEvent::Open => self.diagnostics.log("Connection is opened"),
            ConnectionEvent::Error { message } => {
                self.diagnostics.log(format!("Error: {message}"));
            }
            ConnectionEvent::Closed { code, reason } => {
                debug!(code, reason = %reason, "Connection close details");
                self.diagnostics.log("Connection is closed");
            }
            ConnectionEvent::Message(payload) => self.diagnostics.log(payload),
        }
    }

    /// Makes `screen_id` the only visible screen. Unknown identifiers are a
    /// silent no-op.
    pub fn set_current_screen(&mut self, screen_id: &str) -> bool {
        let switched = self.registry.set_current_screen(screen_id);
        if switched {
            debug!(screen = screen_id, "Switched screen");
        }
        switched
    }

    /// Re-evaluates the connect control against the name field's value.
    pub fn handle_text_input_change(&mut self, value: &str) {
        self.connect_control.apply_input(value);
    }

    /// Click on the connect control. Ignored while the control is disabled.
    pub fn click_connect(&mut self) -> bool {
        if self.connect_control.is_disabled() {
            return false;
        }
        self.set_current_screen(WAITING_SCREEN)
    }

    /// Sends the `transform` frame.
    ///
    /// Without a connection this does nothing. If the connection is not open
    /// the frame is dropped, never queued.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::NotOpen` when the frame was dropped, or the
    /// transport's error when the hand-off failed.
    pub fn message(&mut self) -> ConnectionResult<()> {
        let Some(connection) = &self.connection else {
            return Ok(());
        };

        if !self.connection_state.can_send() {
            let err = ConnectionError::NotOpen {
                state: self.connection_state,
            };
            warn!(error = %err, "Dropping outbound message");
            self.diagnostics.log(format!("Error: {err}"));
            return Err(err);
        }

        if let Err(err) = connection.send_text(TRANSFORM_MESSAGE) {
            warn!(error = %err, "Failed to send message");
            self.diagnostics.log(format!("Error: {err}"));
            return Err(err);
        }

        debug!(message = TRANSFORM_MESSAGE, "Message sent");
        Ok(())
    }

    /// Asks the connection to close.
    pub fn shutdown(&mut self) {
        if let Some(connection) = &self.connection {
            connection.close();
        }
    }

    /// Screen registry.
    #[must_use]
    pub const fn registry(&self) -> &ScreenRegistry<P> {
        &self.registry
    }

    /// Last known connection state.
    #[must_use]
    pub const fn connection_state(&self) -> ConnectionState {
        self.connection_state
    }

    /// Returns true if a connection handle is held.
    #[must_use]
    pub const fn has_connection(&self) -> bool {
        self.connection.is_some()
    }

    /// Connect control.
    #[must_use]
    pub const fn connect_control(&self) -> &ConnectControl {
        &self.connect_control
    }

    /// Diagnostic output.
    #[must_use]
    pub const fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }
}
