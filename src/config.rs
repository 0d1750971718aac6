//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup and then shared read-only through
//! `AppState`.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default Neynar v2 Farcaster API root.
pub const DEFAULT_NEYNAR_API_URL: &str = "https://api.neynar.com/v2/farcaster";

/// Default artwork shown when a channel image is missing or broken.
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/670x670/1e1e2e/cdd6f4.svg";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Neynar API key, sent as the `api_key` header on both lookups.
    /// Not validated: a missing key surfaces as an upstream auth failure.
    pub neynar_api_key: String,
    /// Base URL of the Neynar Farcaster API (no trailing slash)
    pub neynar_api_url: String,
    /// Server port
    pub port: u16,
    /// Frame template image on local disk
    pub template_path: PathBuf,
    /// Artwork used when the channel image is absent or fails to load
    pub placeholder_image_url: String,
    /// Timeout applied to each Neynar API call
    pub api_timeout: Duration,
    /// Timeout applied to each artwork/placeholder fetch, decode included
    pub image_timeout: Duration,
    /// Timeout for compositing and encoding the final PNG
    pub render_timeout: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            neynar_api_key: "test_api_key".to_string(),
            neynar_api_url: "http://127.0.0.1:9".to_string(),
            port: 8080,
            template_path: PathBuf::from("assets/template.png"),
            placeholder_image_url: "http://127.0.0.1:9/placeholder.svg".to_string(),
            api_timeout: Duration::from_secs(10),
            image_timeout: Duration::from_secs(10),
            render_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let neynar_api_key = env::var("NEYNAR_API_KEY")
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        if neynar_api_key.is_empty() {
            tracing::warn!("NEYNAR_API_KEY is not set; upstream lookups will be rejected");
        }

        Ok(Self {
            neynar_api_key,
            neynar_api_url: env::var("NEYNAR_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_NEYNAR_API_URL.to_string()),
            port: parse_var("PORT", 8080)?,
            template_path: env::var("TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("assets/template.png")),
            placeholder_image_url: env::var("PLACEHOLDER_IMAGE_URL")
                .unwrap_or_else(|_| DEFAULT_PLACEHOLDER_IMAGE_URL.to_string()),
            api_timeout: Duration::from_secs(parse_var("API_TIMEOUT_SECS", 10)?),
            image_timeout: Duration::from_secs(parse_var("IMAGE_TIMEOUT_SECS", 10)?),
            render_timeout: Duration::from_secs(parse_var("RENDER_TIMEOUT_SECS", 10)?),
        })
    }
}

/// Read an optional numeric variable, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
