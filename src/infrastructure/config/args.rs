use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "lobbyscreen",
    version,
    about = "A small terminal lobby front-end for a WebSocket game server",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// WebSocket endpoint of the lobby server.
    #[arg(short, long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Seconds to wait for the WebSocket handshake.
    #[arg(long, value_name = "SECS")]
    pub connect_timeout_secs: Option<u64>,
}
