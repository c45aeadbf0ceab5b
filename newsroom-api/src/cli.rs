//! Command-line flags

use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{Config, ConfigError};

/// Storage backend selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    Postgres,
    Memdb,
    Mongodb,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Postgres => "postgres",
            Backend::Memdb => "memdb",
            Backend::Mongodb => "mongodb",
        };
        f.write_str(name)
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| ConfigError::UnknownBackend(s.to_string()))
    }
}

#[derive(Debug, Parser)]
#[command(name = "newsroom", version, about = "HTTP API for posts backed by a pluggable store")]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Storage backend; falls back to `database.type` in the config, then memdb
    #[arg(long, value_enum)]
    pub db: Option<Backend>,

    /// Run the PostgreSQL schema script before serving
    #[arg(long)]
    pub migrate: bool,

    /// Insert sample posts into MongoDB before serving
    #[arg(long)]
    pub seed: bool,

    /// SQL script used by --migrate
    #[arg(long, default_value = "schema.sql")]
    pub schema: PathBuf,
}

impl Cli {
    /// Resolve the backend from the flag, then the config file
    pub fn backend(&self, config: &Config) -> Result<Backend, ConfigError> {
        if let Some(backend) = self.db {
            return Ok(backend);
        }
        match config.database.kind.as_deref() {
            Some(name) => name.parse(),
            None => Ok(Backend::Memdb),
        }
    }
}
