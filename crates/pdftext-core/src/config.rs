use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Minimum number of characters a trimmed extraction must reach to count as readable.
pub const DEFAULT_MIN_TEXT_LENGTH: usize = 10;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SERVER_PORT: u16 = 8000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub fetch_timeout_secs: u64,
    pub min_text_length: usize,
    pub user_agent: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration from an arbitrary key lookup. Missing or
    /// unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            server_port: parse_or(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT),
            fetch_timeout_secs: parse_or(&lookup, "FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS),
            min_text_length: parse_or(&lookup, "MIN_TEXT_LENGTH", DEFAULT_MIN_TEXT_LENGTH),
            user_agent: lookup("FETCH_USER_AGENT").unwrap_or_else(default_user_agent),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_user_agent() -> String {
    format!("pdftext/{}", env!("CARGO_PKG_VERSION"))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, default = %default, "Ignoring unparseable config value");
                default
            }
        },
        None => default,
    }
}
