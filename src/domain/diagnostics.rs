//! Diagnostic output sink.

use std::fmt::Write;

use chrono::{DateTime, Local};
use tracing::info;

/// A single diagnostic line.
#[derive(Debug, Clone)]
pub struct DiagnosticEntry {
    message: String,
    logged_at: DateTime<Local>,
}

impl DiagnosticEntry {
    /// Message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Local time the entry was written.
    #[must_use]
    pub const fn logged_at(&self) -> DateTime<Local> {
        self.logged_at
    }

    /// Formats the entry with a chrono timestamp prefix.
    ///
    /// A format chrono cannot render drops the prefix instead of failing.
    #[must_use]
    pub fn render(&self, timestamp_format: &str) -> String {
        let mut line = String::new();
        if write!(line, "[{}] ", self.logged_at.format(timestamp_format)).is_err() {
            line.clear();
        }
        line.push_str(&self.message);
        line
    }
}

/// Visible diagnostic region. Each write replaces the previous entry and is
/// also forwarded to the tracing log.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    current: Option<DiagnosticEntry>,
}

impl DiagnosticLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the visible entry with `message`.
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!(target: "lobbyscreen::diagnostics", "{message}");
        self.current = Some(DiagnosticEntry {
            message,
            logged_at: Local::now(),
        });
    }

    /// Entry currently shown.
    #[must_use]
    pub const fn current(&self) -> Option<&DiagnosticEntry> {
        self.current.as_ref()
    }

    /// Message currently shown.
    #[must_use]
    pub fn current_message(&self) -> Option<&str> {
        self.current.as_ref().map(DiagnosticEntry::message)
    }
}
