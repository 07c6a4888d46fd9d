//! Configuration loading: TOML file with environment variable overrides.
//!
//! `casestats.toml` is read from the working directory when present; every
//! field falls back to a default. `CASESTATS_*` variables (plus `PORT` and
//! `RUST_LOG`) are applied on top.

use std::path::{Path, PathBuf};

use casestats_adapter_open_data::SourceConfig;
use serde::Deserialize;

/// Daemon configuration, one table per concern.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    /// Case source and cache settings.
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

/// Where the HTTP server listens and what it serves.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on.
    pub host: String,
    pub port: u16,
    /// Directory holding the built dashboard (`index.html`, wasm, css).
    pub static_dir: PathBuf,
}

/// Tracing subscriber settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub filter: String,
}

impl Config {
    /// Load configuration from `casestats.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("casestats.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
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

    /// Apply overrides read through `var`. Later keys win: `CASESTATS_PORT`
    /// over `PORT`, `RUST_LOG` over `CASESTATS_LOG`.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("CASESTATS_HOST") {
            self.server.host = val;
        }
        for key in ["PORT", "CASESTATS_PORT"] {
            if let Some(port) = var(key).and_then(|val| val.parse().ok()) {
                self.server.port = port;
            }
        }
        if let Some(val) = var("CASESTATS_STATIC_DIR") {
            self.server.static_dir = PathBuf::from(val);
        }
        if let Some(val) = var("CASESTATS_SOURCE_URL") {
            self.source.url = val;
        }
        if let Some(limit) = var("CASESTATS_SOURCE_LIMIT").and_then(|val| val.parse().ok()) {
            self.source.limit = limit;
        }
        if let Some(val) = var("CASESTATS_SOURCE_FILE") {
            self.source.file = (!val.is_empty()).then(|| PathBuf::from(val));
        }
        if let Some(ttl) = var("CASESTATS_CACHE_TTL").and_then(|val| val.parse().ok()) {
            self.source.cache_ttl_secs = ttl;
        }
        if let Some(val) = var("CASESTATS_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.source.limit == 0 {
            return Err(ConfigError::Validation(
                "source limit must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` for the TCP listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// The static asset directory, when it exists.
    #[must_use]
    pub fn static_dir(&self) -> Option<&Path> {
        let dir = self.server.static_dir.as_path();
        dir.is_dir().then_some(dir)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: PathBuf::from("dist"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "casestatsd=info,casestats=info,tower_http=debug".to_string(),
        }
    }
}

/// Why the configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed casestats.toml")]
    Parse(#[from] toml::de::Error),
    #[error("cannot read casestats.toml")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
