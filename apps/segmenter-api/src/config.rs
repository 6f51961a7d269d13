//! Service configuration
//!
//! Read from environment variables, after loading `.env` when present.
//! Every variable has a default suited to a local run.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use segmenter_domain::segment::SegmentServiceConfig;
use segmenter_postgres::PgConfig;
use thiserror::Error;

/// Errors raised while reading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable is set but can't be parsed
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Deployment environment, drives log format and verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Dev,
    Prod,
}

impl Environment {
    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Local => "debug",
            Self::Dev | Self::Prod => "info",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Prod => "prod",
        };
        f.write_str(name)
    }
}

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind address (default: localhost:8080)
    pub address: String,
    /// Requests running longer are answered with 408 (default: 10s)
    ///
    /// Keep this above the service's operation timeout, otherwise a slow store
    /// call surfaces as a bare 408 instead of the service's own error.
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "localhost:8080".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub http: HttpConfig,
    pub db: PgConfig,
    pub service: SegmentServiceConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_defaults = PgConfig::default();
        let http_defaults = HttpConfig::default();

        Ok(Self {
            env: parse_or(&lookup, "APP_ENV", Environment::Local)?,
            http: HttpConfig {
                address: lookup("HTTP_ADDRESS").unwrap_or(http_defaults.address),
                request_timeout: secs_or(&lookup, "HTTP_TIMEOUT_SECS", http_defaults.request_timeout)?,
            },
            db: PgConfig {
                host: lookup("DB_HOST").unwrap_or(db_defaults.host),
                port: parse_or(&lookup, "DB_PORT", db_defaults.port)?,
                username: lookup("DB_USERNAME").unwrap_or(db_defaults.username),
                password: lookup("DB_PASSWORD").unwrap_or(db_defaults.password),
                database: lookup("DB_NAME").unwrap_or(db_defaults.database),
                url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", db_defaults.max_connections)?,
                acquire_timeout: db_defaults.acquire_timeout,
            },
            service: SegmentServiceConfig {
                operation_timeout: secs_or(
                    &lookup,
                    "OPERATION_TIMEOUT_SECS",
                    SegmentServiceConfig::default().operation_timeout,
                )?,
            },
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|err: T::Err| ConfigError::InvalidValue {
            key,
            reason: err.to_string(),
            value,
        }),
    }
}

fn secs_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let secs = parse_or(lookup, key, default.as_secs())?;
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            key,
            value: "0".to_string(),
            reason: "must be at least one second".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
