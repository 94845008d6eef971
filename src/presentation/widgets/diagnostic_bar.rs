//! Diagnostic output region.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::domain::{ConnectionState, DiagnosticLog};

const fn state_color(state: ConnectionState) -> Color {
    match state {
        ConnectionState::Connecting => Color::Yellow,
        ConnectionState::Open => Color::Green,
        ConnectionState::Closed => Color::DarkGray,
        ConnectionState::Errored => Color::Red,
    }
}

/// Bottom line: latest diagnostic entry on the left, connection state on the
/// right.
pub struct DiagnosticBar<'a> {
    log: &'a DiagnosticLog,
    state: ConnectionState,
    timestamp_format: &'a str,
}

impl<'a> DiagnosticBar<'a> {
    #[must_use]
    pub const fn new(
        log: &'a DiagnosticLog,
        state: ConnectionState,
        timestamp_format: &'a str,
    ) -> Self {
        Self {
            log,
            state,
            timestamp_format,
        }
    }
}

impl Widget for DiagnosticBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state_label = format!(" {} ", self.state);
        let label_width = u16::try_from(state_label.len()).unwrap_or(u16::MAX);
        let [message_area, state_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(label_width)]).areas(area);

        let message = self
            .log
            .current()
            .map_or_else(String::new, |entry| entry.render(self.timestamp_format));
        Paragraph::new(message)
            .style(Style::default().fg(Color::Gray))
            .render(message_area, buf);

        let state_style = Style::default()
            .fg(state_color(self.state))
            .add_modifier(Modifier::BOLD);
        Paragraph::new(Line::from(Span::styled(state_label, state_style))).render(state_area, buf);
    }
}
