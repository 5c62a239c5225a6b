//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `scootrent.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values. The upstream defaults match the classic
//! single-host deployment: user registry on 8080, scooter registry on 8081,
//! this service on 8082, lock controller on 8083, payment service on 8084.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Base URLs and timeout for the external collaborators.
    pub upstream: UpstreamConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// External collaborator endpoints.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the scooter registry.
    pub scooter_registry_url: String,
    /// Base URL of the user registry.
    pub user_registry_url: String,
    /// Base URL of the lock controller.
    pub lock_control_url: String,
    /// Base URL of the payment service.
    pub payment_url: String,
    /// Per-request timeout for all upstream calls, in milliseconds.
    pub timeout_ms: u64,
}

impl Config {
    /// Load configuration from `scootrent.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("scootrent.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SCOOTRENT_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("SCOOTRENT_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SCOOTRENT_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("SCOOTRENT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("SCOOTRENT_SCOOTER_REGISTRY_URL") {
            self.upstream.scooter_registry_url = val;
        }
        if let Ok(val) = std::env::var("SCOOTRENT_USER_REGISTRY_URL") {
            self.upstream.user_registry_url = val;
        }
        if let Ok(val) = std::env::var("SCOOTRENT_LOCK_CONTROL_URL") {
            self.upstream.lock_control_url = val;
        }
        if let Ok(val) = std::env::var("SCOOTRENT_PAYMENT_URL") {
            self.upstream.payment_url = val;
        }
        if let Ok(val) = std::env::var("SCOOTRENT_UPSTREAM_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                self.upstream.timeout_ms = timeout;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:scootrent.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "scootrentd=info,scootrent=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            scooter_registry_url: "http://localhost:8081".to_string(),
            user_registry_url: "http://localhost:8080".to_string(),
            lock_control_url: "http://localhost:8083".to_string(),
            payment_url: "http://localhost:8084".to_string(),
            timeout_ms: 3000,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
