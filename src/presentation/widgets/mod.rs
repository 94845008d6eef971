mod button;
mod diagnostic_bar;
mod input;

pub use button::ConnectButton;
pub use diagnostic_bar::DiagnosticBar;
pub use input::TextInput;
