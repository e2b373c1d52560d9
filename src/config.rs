//! Runtime configuration, read from the environment.

use std::time::Duration;

/// Default backend root, matching the development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
/// Default records per page.
pub const DEFAULT_PAGE_SIZE: usize = 5;
/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings shared by every screen.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API root, `TUTORDESK_API_URL`.
    pub base_url: String,
    /// Records per page, `TUTORDESK_PAGE_SIZE`.
    pub page_size: usize,
    /// Per-request HTTP timeout, `TUTORDESK_TIMEOUT_SECS`.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Loads settings from the environment, falling back to the defaults for
    /// anything unset or unparseable. A `.env` file next to the binary is
    /// honored via dotenvy.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();
        Self {
            base_url: std::env::var("TUTORDESK_API_URL").unwrap_or(defaults.base_url),
            page_size: std::env::var("TUTORDESK_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.page_size),
            timeout: std::env::var("TUTORDESK_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}
