//! Application configuration management.

use std::str::FromStr;

use serde::Deserialize;
use tracing::warn;

use crate::jwt::DEFAULT_TOKEN_TTL_SECS;

/// Signing secret used when no secret is configured in development.
///
/// Never reachable in `RunMode::Production`.
pub const DEVELOPMENT_SECRET: &str = "tally-development-secret-do-not-use-in-production";

/// Deployment profile.
///
/// Decides whether a missing JWT secret is fatal or replaced by
/// [`DEVELOPMENT_SECRET`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Local development; a fallback signing secret is allowed.
    #[default]
    Development,
    /// Serving real traffic; every secret must be configured.
    Production,
}

impl RunMode {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl FromStr for RunMode {
    type Err = config::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(config::ConfigError::Message(format!(
                "unknown RUN_MODE '{other}', expected 'development' or 'production'"
            ))),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Deployment profile.
    #[serde(default)]
    pub run_mode: RunMode,
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Content store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// JWT configuration.
    #[serde(default)]
    pub jwt: JwtSettings,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Mark the session cookie `Secure`.
    #[serde(default)]
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            secure_cookies: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Which content store implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Remote headless content store over HTTP.
    #[default]
    Http,
    /// In-process store; data is lost on restart.
    Memory,
}

/// Content store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Base URL of the store API.
    #[serde(default = "default_store_url")]
    pub base_url: String,
    /// Bucket slug holding this application's objects.
    #[serde(default)]
    pub bucket: String,
    /// Read key, sent as a query parameter.
    #[serde(default)]
    pub read_key: Option<String>,
    /// Write key, sent as a bearer token on mutations.
    #[serde(default)]
    pub write_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
    /// How deep related objects are resolved inline.
    #[serde(default = "default_depth")]
    pub depth: u8,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            base_url: default_store_url(),
            bucket: String::new(),
            read_key: None,
            write_key: None,
            timeout_secs: default_store_timeout(),
            depth: default_depth(),
        }
    }
}

fn default_store_url() -> String {
    "https://api.cosmicjs.com/v3".to_string()
}

fn default_store_timeout() -> u64 {
    10
}

fn default_depth() -> u8 {
    1
}

/// JWT settings as read from configuration sources.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    #[serde(default)]
    pub secret: Option<String>,
    /// Session token lifetime in seconds.
    #[serde(default = "default_ttl")]
    pub ttl_secs: i64,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: None,
            ttl_secs: default_ttl(),
        }
    }
}

fn default_ttl() -> i64 {
    DEFAULT_TOKEN_TTL_SECS
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// `RUN_MODE` picks the profile file and the run mode itself.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode: RunMode = std::env::var("RUN_MODE")
            .unwrap_or_else(|_| "development".to_string())
            .parse()?;

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::File::with_name(&format!("config/{}", run_mode.as_str())).required(false),
            )
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .set_override("run_mode", run_mode.as_str())?
            .build()?;

        config.try_deserialize()
    }

    /// Resolves the JWT signing secret for the current run mode.
    ///
    /// # Errors
    ///
    /// Returns an error in production when no secret is configured.
    pub fn signing_secret(&self) -> Result<String, config::ConfigError> {
        let configured = self
            .jwt
            .secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match (self.run_mode, configured) {
            (_, Some(secret)) => Ok(secret.to_string()),
            (RunMode::Production, None) => Err(config::ConfigError::Message(
                "jwt.secret must be set when RUN_MODE=production".to_string(),
            )),
            (RunMode::Development, None) => {
                warn!("No JWT secret configured, using the development fallback secret");
                Ok(DEVELOPMENT_SECRET.to_string())
            }
        }
    }
}
