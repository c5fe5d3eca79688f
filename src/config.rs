//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the company data backend API
    pub backend_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Backend request timeout in seconds
    pub fetch_timeout: u64,
    /// Page size used when a request does not give one
    pub default_page_size: u32,
    /// Largest page size a request may ask for
    pub max_page_size: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `BACKEND_URL` - Backend API root (default: http://localhost:8080/api)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `FETCH_TIMEOUT` - Backend request timeout in seconds (default: 10)
    /// - `DEFAULT_PAGE_SIZE` - Page size when none is requested (default: 5)
    /// - `MAX_PAGE_SIZE` - Upper bound on requested page sizes (default: 50)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            backend_url: env::var("BACKEND_URL").unwrap_or(defaults.backend_url),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            fetch_timeout: parse_var("FETCH_TIMEOUT").unwrap_or(defaults.fetch_timeout),
            default_page_size: parse_var("DEFAULT_PAGE_SIZE")
                .unwrap_or(defaults.default_page_size),
            max_page_size: parse_var("MAX_PAGE_SIZE").unwrap_or(defaults.max_page_size),
        };
        config.normalized()
    }

    /// Keeps page sizes usable: both at least 1, default no larger than max.
    fn normalized(mut self) -> Self {
        self.max_page_size = self.max_page_size.max(1);
        self.default_page_size = self.default_page_size.clamp(1, self.max_page_size);
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8080/api".to_string(),
            server_port: 3000,
            fetch_timeout: 10,
            default_page_size: 5,
            max_page_size: 50,
        }
    }
}
