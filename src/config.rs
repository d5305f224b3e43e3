//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines the constants
//! for the ping endpoint, logging defaults and default paths. `AppConfig` is the
//! root configuration struct; every section has defaults so an empty file (or no
//! file at all) yields a working plain-HTTP server.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Ping Endpoint
// =============================================================================

/// Path served by the ping handler
pub const PING_PATH: &str = "/rest";

/// Literal body returned by the ping handler
pub const PING_BODY: &str = "ping";

/// Cache-Control for ping responses - probes must always reach the origin
pub const CACHE_CONTROL_PING: &str = "no-cache";

/// Response header carrying the per-request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "ping_rest=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    /// IP literal or hostname; hostnames are resolved when the server starts
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Seconds to drain open connections on SIGINT/SIGTERM (default: 30)
    #[serde(default = "HttpServerConfig::default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
    #[serde(default)]
    pub tls: TlsConfig,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_timeout_seconds: Self::default_shutdown_timeout(),
            tls: TlsConfig::default(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_shutdown_timeout() -> u64 {
        30
    }
}

/// How the listener terminates TLS
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plain HTTP (development or behind a reverse proxy)
    #[default]
    None,
    /// Certificate and key loaded from PEM files, reloadable via SIGHUP
    Manual,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub mode: TlsMode,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
    /// Spawn a plain HTTP listener that redirects to HTTPS
    #[serde(default)]
    pub redirect_http: bool,
    #[serde(default = "TlsConfig::default_redirect_port")]
    pub redirect_port: u16,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            mode: TlsMode::None,
            cert_path: None,
            key_path: None,
            redirect_http: false,
            redirect_port: Self::default_redirect_port(),
        }
    }
}

impl TlsConfig {
    fn default_redirect_port() -> u16 {
        80
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Resolve the configuration for the process, looking for the default
    /// file at [`DEFAULT_CONFIG_PATH`].
    ///
    /// Returns the path that was loaded, or `None` for built-in defaults.
    pub fn resolve(explicit: Option<&str>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::resolve_with_default(explicit.map(Path::new), Path::new(DEFAULT_CONFIG_PATH))
    }

    /// An explicit path must exist. Without one, `default_path` is used when
    /// present and built-in defaults otherwise.
    pub fn resolve_with_default(
        explicit: Option<&Path>,
        default_path: &Path,
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let path = match explicit {
            Some(path) => path,
            None if default_path.exists() => default_path,
            None => return Ok((Self::default(), None)),
        };
        Ok((Self::load(path)?, Some(path.to_path_buf())))
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.host.trim().is_empty() {
            return Err(ConfigError::Validation("http.host must not be empty".to_string()));
        }

        let tls = &self.http.tls;
        match tls.mode {
            TlsMode::Manual if tls.cert_path.is_none() || tls.key_path.is_none() => {
                return Err(ConfigError::Validation(
                    "http.tls.mode = \"manual\" requires both cert_path and key_path".to_string(),
                ));
            }
            TlsMode::Manual if tls.redirect_http && tls.redirect_port == self.http.port => {
                return Err(ConfigError::Validation(format!(
                    "http.tls.redirect_port {} collides with http.port",
                    tls.redirect_port
                )));
            }
            TlsMode::None if tls.redirect_http => {
                return Err(ConfigError::Validation(
                    "http.tls.redirect_http requires http.tls.mode = \"manual\"".to_string(),
                ));
            }
            _ => {}
        }

        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "Unknown logging.format '{}', expected \"text\" or \"json\"",
                other
            ))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
