//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Backend connectivity
//! - `SUPABASE_URL` - Backend service endpoint
//! - `SUPABASE_ANON_KEY` - Public API key (`SUPABASE_KEY` also accepted)
//!
//! Missing backend credentials are NOT a startup failure: the app boots
//! into a configuration-error state that renders remediation instructions
//! on every route and never touches the backend.
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3002)
//! - `ADMIN_BASE_URL` - Public URL for the dashboard, used as the
//!   magic-link redirect target (default: derived from host/port)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (0.0 to 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (0.0 to 1.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Remediation text shown when backend credentials are absent.
pub const MISSING_BACKEND_HELP: &str = "Supabase credentials are missing. Set SUPABASE_URL and \
     SUPABASE_ANON_KEY (or SUPABASE_KEY) in the environment and restart.";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the dashboard (magic-link redirect target)
    pub base_url: String,
    /// Backend connection, `None` when credentials are missing
    pub supabase: Option<SupabaseConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Backend (Supabase) connection configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Service endpoint, e.g. `https://abc.supabase.co`
    pub url: Url,
    /// Public API key sent on every request
    pub anon_key: SecretString,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url.as_str())
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

impl SupabaseConfig {
    /// Load the backend configuration from environment.
    ///
    /// Returns `Ok(None)` when either variable is missing - the caller
    /// serves the configuration-error state instead of crashing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` only when `SUPABASE_URL` is present but not a
    /// valid URL.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let url = get_optional_env("SUPABASE_URL");
        let anon_key =
            get_optional_env("SUPABASE_ANON_KEY").or_else(|| get_optional_env("SUPABASE_KEY"));
        resolve_supabase(url, anon_key)
    }
}

/// Build the backend configuration from already-read variable values.
fn resolve_supabase(
    url: Option<String>,
    anon_key: Option<String>,
) -> Result<Option<SupabaseConfig>, ConfigError> {
    match (url, anon_key) {
        (Some(url), Some(key)) => {
            let url = Url::parse(&url)
                .map_err(|e| ConfigError::InvalidEnvVar("SUPABASE_URL".to_owned(), e.to_string()))?;
            Ok(Some(SupabaseConfig {
                url,
                anon_key: SecretString::from(key),
            }))
        }
        _ => Ok(None),
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a present variable fails to parse. Absent
    /// backend credentials are represented as `supabase: None`, not an
    /// error.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3002")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_owned(), e.to_string()))?;
        let base_url =
            get_optional_env("ADMIN_BASE_URL").unwrap_or_else(|| format!("http://{host}:{port}"));

        let supabase = SupabaseConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            supabase,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The URL magic links redirect back to after the email round trip.
    #[must_use]
    pub fn callback_url(&self) -> String {
        format!("{}/auth/callback", self.base_url.trim_end_matches('/'))
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
