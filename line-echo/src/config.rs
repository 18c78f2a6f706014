//! Configuration module for environment variable parsing.
//!
//! Configuration is read once at startup and injected into the handlers
//! through [`crate::web::AppState`]; request code never touches the environment.

use std::env;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

/// Default LINE Messaging API host.
pub const DEFAULT_LINE_API_BASE_URL: &str = "https://api.line.me";

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Channel secret used as the HMAC key for `X-Line-Signature`
    pub channel_secret: Option<String>,

    /// Channel access token for the reply API
    pub channel_access_token: Option<String>,

    /// Base URL of the Messaging API (overridable for local testing)
    pub line_api_base_url: String,

    /// HTTP request timeout in milliseconds for outbound replies
    pub request_timeout_ms: u64,

    /// Port for the web server to listen on
    pub port: u16,
}

/// Missing or unusable configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            channel_secret: non_empty("LINE_CHANNEL_SECRET"),

            channel_access_token: non_empty("LINE_CHANNEL_ACCESS_TOKEN"),

            line_api_base_url: non_empty("LINE_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_LINE_API_BASE_URL.to_string()),

            request_timeout_ms: parse_or("REQUEST_TIMEOUT_MS", 10_000),

            port: parse_or("PORT", 8080),
        }
    }

    /// Check that both channel credentials are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_secret.is_none() {
            return Err(ConfigError::Missing("LINE_CHANNEL_SECRET"));
        }
        if self.channel_access_token.is_none() {
            return Err(ConfigError::Missing("LINE_CHANNEL_ACCESS_TOKEN"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

// Secrets stay out of debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("channel_secret_set", &self.channel_secret.is_some())
            .field("channel_access_token_set", &self.channel_access_token.is_some())
            .field("line_api_base_url", &self.line_api_base_url)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("port", &self.port)
            .finish()
    }
}

/// Read a variable, treating blank values as unset.
fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a variable, falling back to `default` when unset or malformed.
fn parse_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}
