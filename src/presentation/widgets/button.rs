//! Connect button.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::{ConnectControl, DISABLED_MARKER};

/// Renders a [`ConnectControl`]. The `disabled` marker dims it.
pub struct ConnectButton<'a> {
    control: &'a ConnectControl,
    label: &'a str,
}

impl<'a> ConnectButton<'a> {
    #[must_use]
    pub const fn new(control: &'a ConnectControl, label: &'a str) -> Self {
        Self { control, label }
    }

    fn style(&self) -> Style {
        if self.control.has_class(DISABLED_MARKER) {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        }
    }
}

impl Widget for ConnectButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self.style();
        let block = Block::default().borders(Borders::ALL).border_style(style);
        Paragraph::new(self.label)
            .alignment(Alignment::Center)
            .style(style)
            .block(block)
            .render(area, buf);
    }
}
