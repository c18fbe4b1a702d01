//! Application configuration loaded from environment variables.

use std::time::Duration;

use thiserror::Error;
use upstream::UpstreamEndpoint;

const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 5000;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Errors raised while turning configuration into running clients.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An upstream has no `<SERVICE>_URL` and in-memory mode is off.
    #[error("Missing environment variable {0}")]
    MissingUrl(&'static str),

    /// An upstream client could not be built from its endpoint.
    #[error(transparent)]
    Upstream(#[from] upstream::UpstreamError),
}

/// Endpoints of every upstream service, keyed by service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub transactions: Option<UpstreamEndpoint>,
    pub orchestration: Option<UpstreamEndpoint>,
    pub loyalty: Option<UpstreamEndpoint>,
    pub carbon: Option<UpstreamEndpoint>,
    pub donations: Option<UpstreamEndpoint>,
    pub preferences: Option<UpstreamEndpoint>,
    pub accounts: Option<UpstreamEndpoint>,
    pub rewards: Option<UpstreamEndpoint>,
}

impl UpstreamConfig {
    fn from_env() -> Self {
        Self {
            transactions: endpoint_from_env("TRANSACTIONS"),
            orchestration: endpoint_from_env("ORCHESTRATION"),
            loyalty: endpoint_from_env("LOYALTY"),
            carbon: endpoint_from_env("CARBON"),
            donations: endpoint_from_env("DONATIONS"),
            preferences: endpoint_from_env("PREFERENCES"),
            accounts: endpoint_from_env("ACCOUNTS"),
            rewards: endpoint_from_env("REWARDS"),
        }
    }
}

/// Reads `<PREFIX>_URL` and the optional `<PREFIX>_API_KEY`.
fn endpoint_from_env(prefix: &str) -> Option<UpstreamEndpoint> {
    let url = std::env::var(format!("{prefix}_URL"))
        .ok()
        .filter(|url| !url.trim().is_empty())?;
    let endpoint = UpstreamEndpoint::new(url.trim());
    match std::env::var(format!("{prefix}_API_KEY")) {
        Ok(key) if !key.is_empty() => Some(endpoint.with_api_key(key)),
        _ => Some(endpoint),
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default `"0.0.0.0"`)
/// - `PORT`: listen port (default `3000`)
/// - `RUST_LOG`: tracing filter directive (default `"info"`)
/// - `LOG_FORMAT`: `json` for JSON log lines, anything else for text
/// - `UPSTREAM_TIMEOUT_MS`: per-call upstream timeout (default `5000`, also used for `0`)
/// - `USE_IN_MEMORY_UPSTREAMS`: `true` to run against in-memory services
/// - `<SERVICE>_URL` / `<SERVICE>_API_KEY` for `TRANSACTIONS`,
///   `ORCHESTRATION`, `LOYALTY`, `CARBON`, `DONATIONS`, `PREFERENCES`,
///   `ACCOUNTS` and `REWARDS`
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub upstream_timeout: Duration,
    pub use_in_memory_upstreams: bool,
    pub upstreams: UpstreamConfig,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: match std::env::var("LOG_FORMAT") {
                Ok(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            upstream_timeout: Duration::from_millis(
                std::env::var("UPSTREAM_TIMEOUT_MS")
                    .ok()
                    .and_then(|ms| ms.parse().ok())
                    .filter(|&ms: &u64| ms > 0)
                    .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_MS),
            ),
            use_in_memory_upstreams: std::env::var("USE_IN_MEMORY_UPSTREAMS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            upstreams: UpstreamConfig::from_env(),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            upstream_timeout: Duration::from_millis(DEFAULT_UPSTREAM_TIMEOUT_MS),
            use_in_memory_upstreams: false,
            upstreams: UpstreamConfig::default(),
        }
    }
}

/// Returns the endpoint or the name of the variable that should have set it.
pub(crate) fn required<'a>(
    endpoint: &'a Option<UpstreamEndpoint>,
    variable: &'static str,
) -> Result<&'a UpstreamEndpoint, ConfigError> {
    endpoint.as_ref().ok_or(ConfigError::MissingUrl(variable))
}
