//! In-game screen.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::ConnectionState;

pub struct GameScreen<'a> {
    player_name: &'a str,
    state: ConnectionState,
}

impl<'a> GameScreen<'a> {
    #[must_use]
    pub const fn new(player_name: &'a str, state: ConnectionState) -> Self {
        Self { player_name, state }
    }
}

impl Widget for GameScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Playing as {} ", self.player_name);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let send_hint = if self.state.can_send() {
            Span::styled("Ctrl+T: send transform", Style::default().fg(Color::White))
        } else {
            Span::styled(
                "Ctrl+T: send transform (connection not open)",
                Style::default().fg(Color::DarkGray),
            )
        };

        let lines = vec![
            Line::from(Span::styled(
                "Game in progress",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(""),
            Line::from(send_hint).centered(),
        ];
        Paragraph::new(lines).render(center, buf);
    }
}
