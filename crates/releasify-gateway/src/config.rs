use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_RELEASE_SERVICE_URL: &str = "http://localhost:8080";
const DEFAULT_RELEASE_SERVICE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RATE_LIMIT_RPM: u64 = 60;
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Log verbosity accepted in `LOG_LEVEL`.
///
/// Accepts the tracing level names plus the classic `warning`, `critical`,
/// `fatal` and `notset` spellings, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" | "notset" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" | "critical" | "fatal" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct GatewayConfig {
    /// Log verbosity, fixed at startup
    pub log_level: LogLevel,
    /// Server port
    pub port: u16,
    /// Base URL of the remote release service
    pub release_service_url: Url,
    /// Timeout for a single call to the release service
    pub release_service_timeout: Duration,
    /// Rate limit requests per minute
    pub rate_limit_rpm: u64,
    /// CORS allowed origins (empty = localhost only)
    pub allowed_origins: Vec<String>,
    /// Request payload limit in bytes
    pub max_body_bytes: usize,
    /// Bearer token required for /metrics (None = public)
    pub metrics_token: Option<String>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("log_level", &self.log_level)
            .field("port", &self.port)
            .field("release_service_url", &self.release_service_url.as_str())
            .field("release_service_timeout", &self.release_service_timeout)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .field("allowed_origins", &self.allowed_origins)
            .field("max_body_bytes", &self.max_body_bytes)
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Unset and empty variables take their defaults. Set but unparsable
    /// values are errors so a bad deployment fails at startup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());

        let log_level = match var("LOG_LEVEL") {
            Some(raw) => raw.parse()?,
            None => LogLevel::default(),
        };

        let port = parse_or("PORT", var("PORT"), DEFAULT_PORT)?;

        let raw_url =
            var("RELEASE_SERVICE_URL").unwrap_or_else(|| DEFAULT_RELEASE_SERVICE_URL.to_string());
        let release_service_url =
            Url::parse(&raw_url).map_err(|_| ConfigError::InvalidUrl(raw_url.clone()))?;
        if !matches!(release_service_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(raw_url));
        }

        let timeout_secs = parse_or(
            "RELEASE_SERVICE_TIMEOUT_SECS",
            var("RELEASE_SERVICE_TIMEOUT_SECS"),
            DEFAULT_RELEASE_SERVICE_TIMEOUT_SECS,
        )?;

        let rate_limit_rpm = parse_or(
            "RATE_LIMIT_RPM",
            var("RATE_LIMIT_RPM"),
            DEFAULT_RATE_LIMIT_RPM,
        )?;
        if rate_limit_rpm == 0 {
            return Err(ConfigError::InvalidValue {
                name: "RATE_LIMIT_RPM",
                value: "0".to_string(),
            });
        }

        let allowed_origins: Vec<String> = var("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let max_body_bytes = parse_or(
            "MAX_BODY_BYTES",
            var("MAX_BODY_BYTES"),
            DEFAULT_MAX_BODY_BYTES,
        )?;

        let metrics_token = var("METRICS_TOKEN");

        Ok(Self {
            log_level,
            port,
            release_service_url,
            release_service_timeout: Duration::from_secs(timeout_secs),
            rate_limit_rpm,
            allowed_origins,
            max_body_bytes,
            metrics_token,
        })
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid LOG_LEVEL {0:?}: expected one of trace, debug, info, warning, error, critical")]
    InvalidLogLevel(String),

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
