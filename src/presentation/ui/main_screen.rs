//! Start screen: name entry and connect button.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::domain::ConnectControl;
use crate::presentation::widgets::{ConnectButton, TextInput};

const MAX_NAME_CHARS: usize = 24;

/// What a key did on the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    /// Nothing the controller needs to hear about.
    None,
    /// The name field's value changed.
    InputChanged,
    /// The connect button was pressed.
    Connect,
}

/// Start screen state.
pub struct MainScreen {
    name_input: TextInput,
}

impl MainScreen {
    #[must_use]
    pub fn new(mask_name: bool) -> Self {
        let mut name_input = TextInput::new("Name")
            .masked(mask_name)
            .placeholder("Pick a name...")
            .max_chars(MAX_NAME_CHARS);
        name_input.set_focused(true);

        Self { name_input }
    }

    /// Current name field value.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name_input.value()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> MainAction {
        let changed = match key.code {
            KeyCode::Enter => return MainAction::Connect,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.name_input.input_char(c)
            }
            KeyCode::Backspace => self.name_input.backspace(),
            KeyCode::Delete => self.name_input.delete(),
            KeyCode::Left => {
                self.name_input.move_left();
                false
            }
            KeyCode::Right => {
                self.name_input.move_right();
                false
            }
            KeyCode::Home => {
                self.name_input.move_start();
                false
            }
            KeyCode::End => {
                self.name_input.move_end();
                false
            }
            _ => false,
        };

        if changed {
            MainAction::InputChanged
        } else {
            MainAction::None
        }
    }

    /// Returns a widget drawing this screen with `control` as the button.
    #[must_use]
    pub const fn view<'a>(&'a self, control: &'a ConnectControl) -> MainScreenView<'a> {
        MainScreenView {
            screen: self,
            control,
        }
    }
}

pub struct MainScreenView<'a> {
    screen: &'a MainScreen,
    control: &'a ConnectControl,
}

impl Widget for MainScreenView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(11),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, content_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(40),
            Constraint::Fill(1),
        ])
        .areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Lobby ");
        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [title, _, input, button, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new("Enter a name to join the game")
            .style(Style::default().fg(Color::White))
            .render(title, buf);

        (&self.screen.name_input).render(input, buf);

        let [_, button_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(14),
            Constraint::Fill(1),
        ])
        .areas(button);
        ConnectButton::new(self.control, "Connect").render(button_area, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("Enter: Connect", Style::default().fg(Color::DarkGray)),
            Span::raw(" | "),
            Span::styled("Esc: Quit", Style::default().fg(Color::DarkGray)),
        ]))
        .render(hint, buf);
    }
}
