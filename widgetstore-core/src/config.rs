//! Database configuration.
//!
//! Credentials are supplied by the caller, never embedded in code:
//! either a TOML file (`[database]` table) or environment variables
//! (`WIDGETSTORE_DB_HOST` and friends).

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

const DEFAULT_PORT: u16 = 5432;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Connection parameters for the widget catalog database.
#[derive(Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

/// File wrapper so config files read `[database]` at the top level.
#[derive(Deserialize)]
struct ConfigFile {
    database: DbConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file (invalid TOML): {0}")]
    Parse(#[from] toml::de::Error),

    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

impl DbConfig {
    /// Load config from a TOML file with a `[database]` table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file: ConfigFile = toml::from_str(&content)?;
        Ok(file.database)
    }

    /// Build config from `WIDGETSTORE_DB_*` environment variables.
    ///
    /// `WIDGETSTORE_DB_PORT` is optional and defaults to 5432.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("WIDGETSTORE_DB_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "WIDGETSTORE_DB_PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            host: require_env("WIDGETSTORE_DB_HOST")?,
            port,
            user: require_env("WIDGETSTORE_DB_USER")?,
            password: require_env("WIDGETSTORE_DB_PASSWORD")?,
            database: require_env("WIDGETSTORE_DB_NAME")?,
        })
    }

    /// Driver connect options.
    ///
    /// Built field by field rather than via a URL string, so credentials
    /// never need URL escaping.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

fn require_env(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::MissingEnv(var))
}

// Manual impl: the password must not leak into logs or panics.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}
