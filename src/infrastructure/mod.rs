//! Infrastructure layer with the WebSocket transport and configuration.

/// Application configuration.
pub mod config;
/// WebSocket transport and connection driver.
pub mod websocket;

pub use config::{AppConfig, CliArgs, ConfigLoader, LogLevel};
pub use websocket::WebSocketHandle;
