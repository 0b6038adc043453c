//! Portal configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `FLEET_HOST` - Bind address (default: 127.0.0.1)
//! - `FLEET_PORT` - Listen port (default: 3000)
//! - `FLEET_BASE_URL` - Public URL for the portal (default: <http://localhost:3000>)
//! - `FLEET_DATA_DIR` - Directory holding the record storage (default: data)
//! - `FLEET_STORAGE_KEY` - Key of the user-record collection (default: fleetUser)
//! - `FLEET_SUBMIT_DELAY_MS` - Artificial latency before a form is processed (default: 500)
//! - `FLEET_REDIRECT_DELAY_MS` - Delay before a successful form redirects (default: 500)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default key of the record collection.
pub const DEFAULT_STORAGE_KEY: &str = "fleetUser";

/// Default artificial form latency and redirect delay, in milliseconds.
const DEFAULT_DELAY_MS: u64 = 500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Portal application configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the portal
    pub base_url: String,
    /// Directory of the file-backed record storage
    pub data_dir: PathBuf,
    /// Key the record collection is stored under
    pub storage_key: String,
    /// Latency applied before a submitted form is processed
    pub submit_delay: Duration,
    /// Delay before a successful form redirects to the dashboard
    pub redirect_delay: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            data_dir: PathBuf::from("data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            submit_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            redirect_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = parse_env_or("FLEET_HOST", defaults.host)?;
        let port = parse_env_or("FLEET_PORT", defaults.port)?;
        let base_url = get_env_or_default("FLEET_BASE_URL", &defaults.base_url);
        let data_dir = get_optional_env("FLEET_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let storage_key = get_env_or_default("FLEET_STORAGE_KEY", &defaults.storage_key);
        validate_storage_key(&storage_key)?;
        let submit_delay = Duration::from_millis(parse_env_or(
            "FLEET_SUBMIT_DELAY_MS",
            DEFAULT_DELAY_MS,
        )?);
        let redirect_delay = Duration::from_millis(parse_env_or(
            "FLEET_REDIRECT_DELAY_MS",
            DEFAULT_DELAY_MS,
        )?);

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            storage_key,
            submit_delay,
            redirect_delay,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the portal is served over HTTPS (session cookies are marked secure).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Storage keys become file names, so only a conservative alphabet is allowed.
fn validate_storage_key(key: &str) -> Result<(), ConfigError> {
    if crate::db::is_valid_key(key) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "FLEET_STORAGE_KEY".to_string(),
            format!("'{key}' must be non-empty and contain only letters, digits, '-' or '_'"),
        ))
    }
}
