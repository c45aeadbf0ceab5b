//! Server configuration loaded from a JSON file at startup

use newsroom_storage::MongoConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown database type: {0}")]
    UnknownBackend(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Backend used when none is given on the command line
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub postgres: PostgresConfig,
    pub mongodb: MongoDbConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PostgresConfig {
    pub user: String,
    pub password: String,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub sslmode: String,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            user: "postgres".to_string(),
            password: String::new(),
            name: "newsroom".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            sslmode: "disable".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MongoDbConfig {
    pub uri: String,
    #[serde(rename = "dbname")]
    pub db_name: String,
}

impl Default for MongoDbConfig {
    fn default() -> Self {
        let defaults = MongoConfig::default();
        Self {
            uri: defaults.uri,
            db_name: defaults.database,
        }
    }
}

impl Config {
    /// Read and parse the JSON file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn postgres_dsn(&self) -> String {
        let pg = &self.database.postgres;
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            pg.user, pg.password, pg.host, pg.port, pg.name, pg.sslmode
        )
    }

    pub fn mongo_config(&self) -> MongoConfig {
        MongoConfig {
            uri: self.database.mongodb.uri.clone(),
            database: self.database.mongodb.db_name.clone(),
        }
    }
}
