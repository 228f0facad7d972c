//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://localhost:3000`).
//!   An `https` URL marks the session cookie secure.
//! - `STOREFRONT_LOG_FORMAT` - `text` (default) or `json`
//! - `GEMINI_API_KEY` - Generative Language API key (falls back to `API_KEY`).
//!   Without a key every styling request returns the fallback advice.
//! - `STYLIST_MODEL` - Model name (default: gemini-3-flash-preview)
//! - `STYLIST_API_BASE` - API base URL
//!   (default: `https://generativelanguage.googleapis.com/v1beta`)
//! - `STYLIST_TIMEOUT_MS` - Per-attempt timeout (default: 10000, 0 disables)
//! - `STYLIST_MAX_RETRIES` - Retries after a transient failure (default: 0)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_STYLIST_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_STYLIST_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_STYLIST_TIMEOUT_MS: u64 = 10_000;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Log output format
    pub log_format: LogFormat,
    /// Styling advice API configuration
    pub stylist: StylistConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Styling advice API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct StylistConfig {
    /// API key; `None` disables the remote call
    pub api_key: Option<SecretString>,
    /// Model name, e.g. `gemini-3-flash-preview`
    pub model: String,
    /// API base URL, without the `/models/...` suffix
    pub api_base: Url,
    /// Per-attempt timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Extra attempts after a transient failure
    pub max_retries: u32,
}

impl std::fmt::Debug for StylistConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StylistConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("api_base", &self.api_base.as_str())
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl Default for StylistConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_STYLIST_MODEL.to_string(),
            api_base: default_api_base(),
            timeout: Some(Duration::from_millis(DEFAULT_STYLIST_TIMEOUT_MS)),
            max_retries: 0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or the API key fails
    /// validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`StorefrontConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        Ok(Self {
            host: env.parse_or("STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: env.parse_or("STOREFRONT_PORT", 3000)?,
            base_url: env.parse_or("STOREFRONT_BASE_URL", default_base_url())?,
            log_format: env.parse_or("STOREFRONT_LOG_FORMAT", LogFormat::Text)?,
            stylist: StylistConfig::from_env(&env)?,
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: default_base_url(),
            log_format: LogFormat::Text,
            stylist: StylistConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StylistConfig {
    fn from_env<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = match env.get("GEMINI_API_KEY").or_else(|| env.get("API_KEY")) {
            Some(key) => {
                validate_secret_strength(&key, "GEMINI_API_KEY")?;
                Some(SecretString::from(key))
            }
            None => None,
        };

        let timeout_ms: u64 = env.parse_or("STYLIST_TIMEOUT_MS", DEFAULT_STYLIST_TIMEOUT_MS)?;

        Ok(Self {
            api_key,
            model: env
                .get("STYLIST_MODEL")
                .unwrap_or_else(|| DEFAULT_STYLIST_MODEL.to_string()),
            api_base: env.parse_or("STYLIST_API_BASE", default_api_base())?,
            timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
            max_retries: env.parse_or("STYLIST_MAX_RETRIES", 0)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup that treats blank values as unset.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key)
            .map_or(Ok(default), |v| v.trim().parse().map_err(|e| invalid(key, &e)))
    }
}

fn invalid(key: &str, err: &dyn std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

fn default_api_base() -> Url {
    Url::parse(DEFAULT_STYLIST_API_BASE).expect("default API base is a valid URL")
}

fn default_base_url() -> Url {
    Url::parse("http://localhost:3000").expect("default base URL is a valid URL")
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    let mut chars = 0_usize;
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
        chars += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = chars as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a real API key."
            ),
        ));
    }

    Ok(())
}
