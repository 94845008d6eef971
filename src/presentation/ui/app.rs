//! Main application loop.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Layout};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::game_screen::GameScreen;
use super::main_screen::{MainAction, MainScreen};
use super::panel::{GAME_SCREEN, ScreenKind, TerminalPanel};
use super::waiting_screen::WaitingScreen;
use crate::application::ScreenController;
use crate::domain::{ConnectionEvent, ConnectionPort};
use crate::infrastructure::{AppConfig, WebSocketHandle};
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::widgets::DiagnosticBar;

const CLOSE_GRACE_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

pub struct App<C = WebSocketHandle> {
    state: AppState,
    controller: ScreenController<TerminalPanel, C>,
    connection_rx: Option<mpsc::UnboundedReceiver<ConnectionEvent>>,
    main_screen: MainScreen,
    timestamp_format: String,
}

impl App<WebSocketHandle> {
    /// Opens the lobby connection and builds the screens.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn initialize(config: &AppConfig) -> Self {
        info!(endpoint = %config.endpoint, "Opening lobby connection");
        let (handle, connection_rx) =
            WebSocketHandle::open(config.endpoint.clone(), config.connect_timeout());
        Self::with_connection(Some(handle), Some(connection_rx), config)
    }
}

impl<C: ConnectionPort> App<C> {
    #[must_use]
    pub fn with_connection(
        connection: Option<C>,
        connection_rx: Option<mpsc::UnboundedReceiver<ConnectionEvent>>,
        config: &AppConfig,
    ) -> Self {
        let controller = ScreenController::initialize(connection, TerminalPanel::lobby());

        Self {
            state: AppState::Running,
            controller,
            connection_rx,
            main_screen: MainScreen::new(config.ui.mask_name),
            timestamp_format: config.ui.timestamp_format.clone(),
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.run_event_loop(terminal).await?;

        self.controller.shutdown();
        self.drain_connection().await;
        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            let connection_future = match &mut self.connection_rx {
                Some(rx) => futures_util::future::Either::Left(rx.recv()),
                None => futures_util::future::Either::Right(std::future::pending()),
            };

            tokio::select! {
                biased;

                event = connection_future => {
                    match event {
                        Some(event) => self.controller.handle_connection_event(event),
                        None => {
                            debug!("Connection task finished");
                            self.connection_rx = None;
                        }
                    }
                }

                event = terminal_events.next() => self.handle_terminal_event(event),
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    /// Applies one item from the terminal event stream. The stream ending or
    /// failing means input is gone, so the app exits.
    fn handle_terminal_event(&mut self, event: Option<std::io::Result<Event>>) {
        match event {
            Some(Ok(Event::Key(key))) => {
                if self.handle_key(key) == EventResult::Exit {
                    self.state = AppState::Exiting;
                }
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                warn!(error = %e, "Terminal input failed");
                self.state = AppState::Exiting;
            }
            None => {
                debug!("Terminal input closed");
                self.state = AppState::Exiting;
            }
        }
    }

    /// Lets the driver flush the close frame before the runtime goes away.
    async fn drain_connection(&mut self) {
        let Some(rx) = self.connection_rx.as_mut() else {
            return;
        };

        let drained = timeout(CLOSE_GRACE_PERIOD, async {
            while let Some(event) = rx.recv().await {
                debug!(?event, "Connection event during shutdown");
            }
        })
        .await;

        if drained.is_err() {
            debug!("Connection did not close within grace period");
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if key.kind != KeyEventKind::Press {
            return EventResult::Continue;
        }

        if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        }

        if EventHandler::is_transform_event(&key) {
            // Failures are already reported in the diagnostic output.
            let _ = self.controller.message();
            return EventResult::Continue;
        }

        if EventHandler::is_game_screen_event(&key) {
            self.controller.set_current_screen(GAME_SCREEN);
            return EventResult::Continue;
        }

        if self.active_kind() == Some(ScreenKind::Main) {
            match self.main_screen.handle_key(key) {
                MainAction::InputChanged => {
                    self.controller
                        .handle_text_input_change(self.main_screen.name());
                }
                MainAction::Connect => {
                    if self.controller.click_connect() {
                        info!(name = %self.main_screen.name(), "Joined lobby");
                    }
                }
                MainAction::None => {}
            }
        }

        EventResult::Continue
    }

    fn active_kind(&self) -> Option<ScreenKind> {
        self.controller.registry().active().map(TerminalPanel::kind)
    }

    fn render(&self, frame: &mut Frame) {
        let [content_area, diagnostic_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        let name = self.main_screen.name();
        match self.active_kind() {
            Some(ScreenKind::Main) => frame.render_widget(
                self.main_screen.view(self.controller.connect_control()),
                content_area,
            ),
            Some(ScreenKind::Waiting) => {
                frame.render_widget(WaitingScreen::new(name), content_area);
            }
            Some(ScreenKind::Game) => frame.render_widget(
                GameScreen::new(name, self.controller.connection_state()),
                content_area,
            ),
            None => {}
        }

        frame.render_widget(
            DiagnosticBar::new(
                self.controller.diagnostics(),
                self.controller.connection_state(),
                &self.timestamp_format,
            ),
            diagnostic_area,
        );
    }

    #[must_use]
    pub const fn controller(&self) -> &ScreenController<TerminalPanel, C> {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{TRANSFORM_MESSAGE, WAITING_SCREEN};
    use crate::domain::ports::mocks::MockConnection;
    use crate::domain::{ConnectionError, ConnectionState};
    use crate::presentation::ui::MAIN_SCREEN;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app() -> (App<MockConnection>, MockConnection) {
        let connection = MockConnection::new();
        let app = App::with_connection(Some(connection.clone()), None, &AppConfig::default());
        (app, connection)
    }

    fn visible(app: &App<MockConnection>) -> Vec<String> {
        app.controller()
            .registry()
            .visible_ids()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_enter_with_empty_name_stays_on_main() {
        let (mut app, _) = app();
        assert_eq!(app.handle_key(key(KeyCode::Enter)), EventResult::Continue);
        assert_eq!(visible(&app), vec![MAIN_SCREEN]);
    }

    #[test]
    fn test_typing_then_enter_moves_to_waiting() {
        let (mut app, _) = app();
        app.handle_key(key(KeyCode::Char('d')));
        assert!(!app.controller().connect_control().is_disabled());

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(visible(&app), vec![WAITING_SCREEN]);
    }

    #[test]
    fn test_clearing_name_disables_connect() {
        let (mut app, _) = app();
        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Backspace));

        assert!(app.controller().connect_control().is_disabled());
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(visible(&app), vec![MAIN_SCREEN]);
    }

    #[test]
    fn test_transform_shortcut() {
        let (mut app, connection) = app();
        app.handle_key(ctrl('t'));
        assert!(connection.sent().is_empty());

        app.controller.handle_connection_event(ConnectionEvent::Open);
        app.handle_key(ctrl('t'));
        assert_eq!(connection.sent(), vec![TRANSFORM_MESSAGE]);
        assert_eq!(app.main_screen.name(), "");
    }

    #[test]
    fn test_game_shortcut_and_quit() {
        let (mut app, _) = app();
        app.handle_key(key(KeyCode::F(2)));
        assert_eq!(visible(&app), vec![GAME_SCREEN]);

        // Typing is ignored off the main screen.
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.main_screen.name(), "");

        assert_eq!(app.handle_key(key(KeyCode::Esc)), EventResult::Exit);
        assert_eq!(app.handle_key(ctrl('c')), EventResult::Exit);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let (mut app, _) = app();
        let release = KeyEvent::new_with_kind(
            KeyCode::Esc,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(app.handle_key(release), EventResult::Continue);
    }

    #[test]
    fn test_render_shows_diagnostics() {
        let (mut app, _) = app();
        app.controller.handle_connection_event(ConnectionEvent::Open);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let last_row: String = (0..80u16)
            .map(|x| buffer[(x, 23u16)].symbol().to_string())
            .collect();
        assert!(last_row.contains("Connection is opened"));
        assert_eq!(app.controller().connection_state(), ConnectionState::Open);
    }

    #[tokio::test]
    async fn test_drain_connection_consumes_close() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app: App<MockConnection> =
            App::with_connection(Some(MockConnection::new()), Some(rx), &AppConfig::default());

        tx.send(ConnectionEvent::closed(1000, "Closed by client")).unwrap();
        drop(tx);

        app.drain_connection().await;
        let rx = app.connection_rx.as_mut().unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_terminal_input_end_exits() {
        let (mut app, _) = app();
        app.handle_terminal_event(Some(Ok(Event::FocusGained)));
        assert_eq!(app.state, AppState::Running);

        app.handle_terminal_event(None);
        assert_eq!(app.state, AppState::Exiting);
    }

    #[test]
    fn test_terminal_input_error_exits() {
        let (mut app, _) = app();
        app.handle_terminal_event(Some(Err(std::io::Error::other("tty gone"))));
        assert_eq!(app.state, AppState::Exiting);
    }

    #[test]
    fn test_terminal_quit_key_exits() {
        let (mut app, _) = app();
        app.handle_terminal_event(Some(Ok(Event::Key(key(KeyCode::Esc)))));
        assert_eq!(app.state, AppState::Exiting);
    }

    #[test]
    fn test_message_error_type_when_not_open() {
        let (mut app, _) = app();
        assert!(matches!(
            app.controller.message(),
            Err(ConnectionError::NotOpen { .. })
        ));
    }
}
