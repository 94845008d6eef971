//! UI screens.

mod app;
mod game_screen;
mod main_screen;
mod panel;
mod waiting_screen;

pub use app::App;
pub use game_screen::GameScreen;
pub use main_screen::{MainAction, MainScreen};
pub use panel::{GAME_SCREEN, MAIN_SCREEN, ScreenKind, TerminalPanel};
pub use waiting_screen::WaitingScreen;
