//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub upstream: UpstreamConfig,
    pub query_cache: QueryCacheConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    /// Public base URL of this deployment; the wheel client posts to `{base_url}/api/wheel`
    pub base_url: String,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    /// Requests still running after this many seconds are answered with 503
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Access token verification (tokens are issued by the external auth provider)
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_jwt_audience")]
    pub audience: String,
}

/// Third-party endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_countries_url")]
    pub countries_url: String,
    #[serde(default = "default_wheel_api_url")]
    pub wheel_api_url: String,
    #[serde(default = "default_wheel_share_host")]
    pub wheel_share_host: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            countries_url: default_countries_url(),
            wheel_api_url: default_wheel_api_url(),
            wheel_share_host: default_wheel_share_host(),
        }
    }
}

/// How a scoped fetch obtains the caller's guild id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Query the association table on every scoped fetch
    #[default]
    PerCall,
    /// Memoise the resolved guild id per user in the query cache
    Cached,
}

impl std::str::FromStr for ResolutionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "per_call" | "per-call" => Ok(Self::PerCall),
            "cached" => Ok(Self::Cached),
            other => Err(ConfigError::InvalidValue("GUILD_RESOLUTION", other.to_string())),
        }
    }
}

/// Query cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QueryCacheConfig {
    /// Seconds a completed scoped fetch stays fresh; 0 keeps only in-flight de-duplication
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,
    #[serde(default)]
    pub resolution: ResolutionPolicy,
}

impl QueryCacheConfig {
    #[must_use]
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_secs)
    }
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self {
            stale_secs: default_stale_secs(),
            resolution: ResolutionPolicy::default(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "deicidium".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_jwt_audience() -> String {
    "authenticated".to_string()
}

fn default_countries_url() -> String {
    "https://restcountries.com/v3.1/all".to_string()
}

fn default_wheel_api_url() -> String {
    "https://wheelofnames.com/api/v1/wheels/shared".to_string()
}

fn default_wheel_share_host() -> String {
    "https://wheelofnames.com".to_string()
}

fn default_stale_secs() -> u64 {
    30
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required keys are missing or invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
                base_url: lookup("BASE_URL")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .ok_or(ConfigError::MissingVar("BASE_URL"))?,
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: parse_var(&lookup, "API_PORT").ok_or(ConfigError::MissingVar("API_PORT"))?,
                request_timeout_secs: parse_var(&lookup, "REQUEST_TIMEOUT_SECS")
                    .filter(|&secs| secs > 0)
                    .unwrap_or_else(default_request_timeout_secs),
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var(&lookup, "DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(default_min_connections),
            },
            jwt: JwtConfig {
                secret: lookup("SUPABASE_JWT_SECRET")
                    .ok_or(ConfigError::MissingVar("SUPABASE_JWT_SECRET"))?,
                audience: lookup("JWT_AUDIENCE").unwrap_or_else(default_jwt_audience),
            },
            upstream: UpstreamConfig {
                countries_url: lookup("COUNTRIES_API_URL").unwrap_or_else(default_countries_url),
                wheel_api_url: lookup("WHEEL_API_URL").unwrap_or_else(default_wheel_api_url),
                wheel_share_host: lookup("WHEEL_SHARE_HOST")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_wheel_share_host),
            },
            query_cache: QueryCacheConfig {
                stale_secs: parse_var(&lookup, "QUERY_STALE_SECS").unwrap_or_else(default_stale_secs),
                resolution: lookup("GUILD_RESOLUTION")
                    .map(|s| s.parse::<ResolutionPolicy>())
                    .transpose()?
                    .unwrap_or_default(),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var(&lookup, "RATE_LIMIT_REQUESTS_PER_SECOND")
                    .unwrap_or_else(default_requests_per_second),
                burst: parse_var(&lookup, "RATE_LIMIT_BURST").unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.parse().ok())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
