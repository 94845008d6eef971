//! Screen shown after connecting, until the round starts.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct WaitingScreen<'a> {
    player_name: &'a str,
}

impl<'a> WaitingScreen<'a> {
    #[must_use]
    pub const fn new(player_name: &'a str) -> Self {
        Self { player_name }
    }
}

impl Widget for WaitingScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Waiting ");
        let inner = block.inner(area);
        block.render(area, buf);

        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let lines = vec![
            Line::from(Span::styled(
                "Waiting for the game to start...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
            .centered(),
            Line::from(""),
            Line::from(vec![
                Span::raw("Joined as "),
                Span::styled(
                    self.player_name,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
            .centered(),
        ];
        Paragraph::new(lines).render(center, buf);
    }
}
