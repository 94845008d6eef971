//! Application configuration.

use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use super::args::CliArgs;
use crate::infrastructure::websocket::{CONNECTION_TIMEOUT, DEFAULT_ENDPOINT};

const APP_NAME: &str = "lobbyscreen";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";
const DEFAULT_TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// WebSocket endpoint of the lobby server.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Seconds to wait for the WebSocket handshake.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Timestamp format for the diagnostic output (chrono format).
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Mask the name field.
    #[serde(default)]
    pub mask_name: bool,
}

impl UiConfig {
    /// Replaces a timestamp format chrono cannot parse with the default.
    /// Returns false if the configured value was rejected.
    pub fn sanitize(&mut self) -> bool {
        let valid = StrftimeItems::new(&self.timestamp_format)
            .all(|item| !matches!(item, Item::Error));
        if !valid {
            warn!(
                format = %self.timestamp_format,
                fallback = DEFAULT_TIMESTAMP_FORMAT,
                "Invalid timestamp format, using fallback"
            );
            self.timestamp_format = default_timestamp_format();
        }
        valid
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            mask_name: false,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

const fn default_connect_timeout_secs() -> u64 {
    CONNECTION_TIMEOUT.as_secs()
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(endpoint) = args.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(timeout) = args.connect_timeout_secs {
            self.connect_timeout_secs = timeout;
        }
    }

    /// Handshake timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("lobbyscreen.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            endpoint: default_endpoint(),
            connect_timeout_secs: default_connect_timeout_secs(),
            ui: UiConfig::default(),
        }
    }
}
