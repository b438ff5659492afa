//! Runtime settings.
//!
//! Loaded from an optional `partita.toml` in the working directory, with
//! `PARTITA__`-prefixed environment variables layered on top (e.g.
//! `PARTITA__SERVER__PORT=8080`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub server: Server,
}

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level for the env filter, e.g. `info` or `debug`.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
    /// Cap storage operations at this many milliseconds; unset means no cap.
    pub storage_timeout_ms: Option<u64>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: 3000,
            database: Database::Memory,
            storage_timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("partita").required(false))
            .add_source(Environment::with_prefix("PARTITA").separator("__"))
            .build()?
            .try_deserialize()
    }
}
