use std::time::Duration;

/// Endpoint used when neither the config file nor the CLI names one.
pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1/";

/// Default limit on the WebSocket handshake.
pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Close code for a close the client asked for.
pub const CLOSE_NORMAL: u16 = 1000;
/// Close code reported when the connection ended without a close frame.
pub const CLOSE_ABNORMAL: u16 = 1006;
