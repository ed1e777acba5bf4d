//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files and `USERHUB__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod cache;
pub mod logging;
pub mod rate_limit;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::cache::CacheConfig;
pub use self::logging::LoggingConfig;
pub use self::rate_limit::RateLimitConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Key-value store settings (revocation store backend).
    #[serde(default)]
    pub cache: CacheConfig,
    /// Token signing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Admission control settings.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    #[serde(default)]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default`, the `config/{env}` overlay, environment
    /// variables prefixed with `USERHUB__`, and finally the bare variables
    /// used by earlier deployments (`JWT_KEY`, `DB_*`, `REDIS_*`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("USERHUB")
                    .separator("__")
                    .try_parsing(true),
            );

        for (key, value) in legacy_overrides(|name| std::env::var(name).ok()) {
            builder = builder.set_override(key, value)?;
        }

        let config = builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Checks that everything required to serve traffic is present.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret (or JWT_KEY) must be set",
            ));
        }
        if self.auth.token_ttl_hours == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_hours must be greater than zero",
            ));
        }
        if self.database.url.trim().is_empty() {
            return Err(AppError::configuration(
                "database.url (or DB_HOST/DB_USER/DB_NAME) must be set",
            ));
        }
        if self.rate_limit.requests_per_minute == 0 || self.rate_limit.window_seconds == 0 {
            return Err(AppError::configuration(
                "rate_limit.requests_per_minute and rate_limit.window_seconds must be positive",
            ));
        }
        match self.cache.provider.as_str() {
            "memory" | "redis" => Ok(()),
            other => Err(AppError::configuration(format!(
                "Unknown cache provider: '{other}'. Supported: memory, redis"
            ))),
        }
    }
}

/// Maps the bare environment variables used by earlier deployments onto
/// configuration keys.
fn legacy_overrides(lookup: impl Fn(&str) -> Option<String>) -> Vec<(&'static str, String)> {
    let mut overrides = Vec::new();

    if let Some(secret) = lookup("JWT_KEY").filter(|s| !s.is_empty()) {
        overrides.push(("auth.jwt_secret", secret));
    }

    if let (Some(host), Some(user), Some(name)) =
        (lookup("DB_HOST"), lookup("DB_USER"), lookup("DB_NAME"))
    {
        let port = lookup("DB_PORT").unwrap_or_else(|| "5432".to_string());
        let credentials = match lookup("DB_PASSWORD").filter(|p| !p.is_empty()) {
            Some(password) => format!("{user}:{password}"),
            None => user,
        };
        overrides.push((
            "database.url",
            format!("postgres://{credentials}@{host}:{port}/{name}?sslmode=disable"),
        ));
    }

    if let Some(host) = lookup("REDIS_HOST").filter(|h| !h.is_empty()) {
        let port = lookup("REDIS_PORT").unwrap_or_else(|| "6379".to_string());
        let url = match lookup("REDIS_PASSWORD").filter(|p| !p.is_empty()) {
            Some(password) => format!("redis://:{password}@{host}:{port}/0"),
            None => format!("redis://{host}:{port}/0"),
        };
        overrides.push(("cache.redis.url", url));
        overrides.push(("cache.provider", "redis".to_string()));
    }

    overrides
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}
