//! lobbyscreen - a small terminal lobby front-end for a WebSocket game server.
//!
//! The crate keeps one connection to the server, shows one of a few screens
//! at a time and gates the connect button on the name field.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the screen controller.
pub mod application;
/// Domain layer containing screens, connection lifecycle and ports.
pub mod domain;
/// Infrastructure layer containing the WebSocket transport and configuration.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "lobbyscreen";
