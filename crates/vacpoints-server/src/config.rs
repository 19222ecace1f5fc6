//! Server configuration.
//!
//! Loaded from a TOML file when one is given, then overridden by environment
//! variables (`VACPOINTS_HOST`, `VACPOINTS_PORT`, `DATABASE_URL`, `VACPOINTS_SEED`).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

const fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_database_url() -> String {
    "sqlite::memory:".into()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

/// Dataset loaded into an empty resort store at startup.
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_path")]
    pub path: Option<PathBuf>,
}

fn default_seed_path() -> Option<PathBuf> {
    Some(PathBuf::from("data/resorts.json"))
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            path: default_seed_path(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global subscriber. `RUST_LOG` wins over the configured level.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Config {
    /// Read `path` if given, otherwise start from defaults; environment overrides apply on top.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("VACPOINTS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("VACPOINTS_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "VACPOINTS_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(seed) = lookup("VACPOINTS_SEED") {
            // An empty value disables seeding.
            self.seed.path = (!seed.is_empty()).then(|| PathBuf::from(seed));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
