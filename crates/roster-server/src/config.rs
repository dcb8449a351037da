use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: PathBuf,
    /// Cap on requests handled at once; further ones queue.
    pub max_concurrency: usize,
}

impl Config {
    /// Load configuration from environment variables.
    /// Every variable has a default, so an empty environment works.
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = std::env::var("ROSTER_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("ROSTER_LISTEN_ADDR", "must be a valid socket address")
            })?;

        let db_path = std::env::var("ROSTER_DB_PATH")
            .unwrap_or_else(|_| "./roster.redb".to_string())
            .into();

        let max_concurrency = std::env::var("ROSTER_MAX_CONCURRENCY")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("ROSTER_MAX_CONCURRENCY", "must be a positive integer")
            })?;
        if max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "ROSTER_MAX_CONCURRENCY",
                "must be a positive integer",
            ));
        }

        Ok(Config {
            listen_addr,
            db_path,
            max_concurrency,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}
