//! Terminal panels registered with the screen controller.

use crate::application::WAITING_SCREEN;
use crate::domain::{DisplayMode, Panel};

/// Identifier of the start screen.
pub const MAIN_SCREEN: &str = "main";
/// Identifier of the in-game screen.
pub const GAME_SCREEN: &str = "gameScreen";

/// What a panel draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    /// Name entry and connect button.
    Main,
    /// Waiting for the round to start.
    Waiting,
    /// Controls while playing.
    Game,
}

/// A full-screen panel in the terminal UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalPanel {
    id: String,
    kind: ScreenKind,
    display: DisplayMode,
}

impl TerminalPanel {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ScreenKind, display: DisplayMode) -> Self {
        Self {
            id: id.into(),
            kind,
            display,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ScreenKind {
        self.kind
    }

    /// The lobby's panels, with `main` visible.
    #[must_use]
    pub fn lobby() -> Vec<Self> {
        vec![
            Self::new(MAIN_SCREEN, ScreenKind::Main, DisplayMode::Flex),
            Self::new(WAITING_SCREEN, ScreenKind::Waiting, DisplayMode::Hidden),
            Self::new(GAME_SCREEN, ScreenKind::Game, DisplayMode::Hidden),
        ]
    }
}

impl Panel for TerminalPanel {
    fn id(&self) -> Option<&str> {
        Some(self.id.as_str())
    }

    fn display(&self) -> DisplayMode {
        self.display
    }

    fn set_display(&mut self, display: DisplayMode) {
        self.display = display;
    }
}
