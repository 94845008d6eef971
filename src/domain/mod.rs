//! Domain layer with screens, connection lifecycle and port definitions.

/// Connection lifecycle definitions.
pub mod connection;
/// Input-gated connect control.
pub mod control;
/// Diagnostic output sink.
pub mod diagnostics;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Screens and the screen registry.
pub mod screen;

pub use connection::{ConnectionEvent, ConnectionState};
pub use control::{ConnectControl, DISABLED_MARKER};
pub use diagnostics::{DiagnosticEntry, DiagnosticLog};
pub use errors::{ConnectionError, ConnectionResult};
pub use ports::ConnectionPort;
pub use screen::{DisplayMode, Panel, ScreenRegistry};
