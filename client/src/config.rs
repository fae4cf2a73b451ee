//! Runtime configuration for the terminal client.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

/// Command-line and environment configuration.
#[derive(Debug, Parser)]
#[command(name = "coverdesk", about = "Terminal client for the Coverdesk insurance portal")]
pub struct AppConfig {
    /// Base URL of the portal API.
    #[arg(long, env = "COVERDESK_API_URL", default_value = "http://localhost:8081")]
    pub api_url: Url,

    /// Request timeout in seconds.
    #[arg(long, env = "COVERDESK_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// File holding the persisted session (token and pending route).
    #[arg(
        long,
        env = "COVERDESK_SESSION_FILE",
        default_value = ".coverdesk/session.json"
    )]
    pub session_file: PathBuf,
}

impl AppConfig {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
