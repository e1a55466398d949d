use std::path::PathBuf;

use crate::client::DEFAULT_TIMEOUT_SECS;

/// Target used when no base URL is given on the command line.
pub const DEFAULT_BASE_URL: &str = "https://order-status-7.preview.emergentagent.com";

/// Harness configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the target service, without the /api suffix
    pub base_url: String,

    /// Client-side timeout per request (seconds)
    pub timeout_secs: u64,

    /// Output directory for reports
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_dir: PathBuf::from("./output"),
        }
    }
}
