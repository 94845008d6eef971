mod connection;
mod constants;
mod handle;

pub use connection::{OutboundCommand, WebSocketConnection, WebSocketTransport, run_connection};
pub use constants::{CLOSE_ABNORMAL, CLOSE_NORMAL, CONNECTION_TIMEOUT, DEFAULT_ENDPOINT};
pub use handle::WebSocketHandle;
