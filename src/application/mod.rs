//! Application layer with the screen controller.

/// Screen controller.
pub mod controller;

pub use controller::{ScreenController, TRANSFORM_MESSAGE, WAITING_SCREEN};
