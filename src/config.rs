use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Default base URL of the detection service
pub const DEFAULT_DETECTOR_BASE_URL: &str = "http://localhost:5000";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Detection service settings
    pub detector: DetectorConfig,
    /// MCP server settings
    pub server: ServerConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Settings for the remote detection service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectorConfig {
    /// Base URL of the detection service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DETECTOR_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Settings for the MCP server itself
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// How long to wait for in-flight requests during shutdown
    pub graceful_shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            graceful_shutdown_timeout_secs: 5,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log output format: pretty or json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Command-line overrides applied on top of file and environment sources
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl Config {
    /// Load configuration from defaults, an optional TOML file, environment
    /// variables (prefix `STRIPE_DETECTOR`), and CLI overrides, in that
    /// order of precedence.
    pub fn load(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = config_path {
            debug!("Loading configuration file: {}", path.display());
            builder = builder.add_source(config::File::from(path));
        } else if let Some(default_path) = Self::default_config_path() {
            if default_path.exists() {
                debug!(
                    "Loading default configuration file: {}",
                    default_path.display()
                );
                builder = builder.add_source(config::File::from(default_path));
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix("STRIPE_DETECTOR")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_overrides(overrides);
        config.validate()?;

        info!(
            "Configuration loaded: detector at {}",
            config.detector.base_url
        );
        Ok(config)
    }

    /// Load configuration from an explicit file path only (no env layering)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Platform config file location, e.g. `~/.config/stripe-detector-mcp/config.toml`
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stripe-detector-mcp").join("config.toml"))
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref base_url) = overrides.base_url {
            self.detector.base_url = base_url.clone();
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.detector.timeout_secs = timeout_secs;
        }
        if let Some(ref level) = overrides.log_level {
            self.logging.level = level.clone();
        }
        if let Some(ref format) = overrides.log_format {
            self.logging.format = format.clone();
        }
    }

    /// Validate the configuration, rejecting values the server cannot run with
    pub fn validate(&self) -> Result<()> {
        let parsed = Url::parse(&self.detector.base_url).map_err(|e| Error::InvalidInput {
            field: "detector.base_url".to_string(),
            reason: format!("not a valid URL: {e}"),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::InvalidInput {
                field: "detector.base_url".to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        if self.detector.timeout_secs == 0 {
            return Err(Error::InvalidInput {
                field: "detector.timeout_secs".to_string(),
                reason: "timeout must be greater than zero".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(Error::InvalidInput {
                field: "logging.level".to_string(),
                reason: format!(
                    "invalid log level '{}', expected one of {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        if self.logging.format != "pretty" && self.logging.format != "json" {
            return Err(Error::InvalidInput {
                field: "logging.format".to_string(),
                reason: format!(
                    "invalid log format '{}', expected 'pretty' or 'json'",
                    self.logging.format
                ),
            });
        }

        Ok(())
    }
}
