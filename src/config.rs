use std::env;
use std::net::SocketAddr;

use dotenv::dotenv;
use thiserror::Error;
use tracing::info;

const DATABASE_URL: &str = "TRIVIA_DATABASE_URL";
const BIND_ADDR: &str = "TRIVIA_BIND_ADDR";
const MAX_CONNECTIONS: &str = "TRIVIA_MAX_CONNECTIONS";

const DEFAULT_DATABASE_URL: &str = "sqlite://trivia.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        // Load .env file
        dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; unset variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = parse_or(lookup(BIND_ADDR), BIND_ADDR, DEFAULT_BIND_ADDR)?;

        let max_connections = match lookup(MAX_CONNECTIONS) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(invalid(MAX_CONNECTIONS, raw)),
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        info!("Using database {} with up to {} connections", database_url, max_connections);

        Ok(Config {
            database_url,
            bind_addr,
            max_connections,
        })
    }

    /// Overrides the bind address from a raw string, e.g. a CLI flag.
    pub fn with_bind_addr(mut self, raw: &str) -> Result<Config, ConfigError> {
        self.bind_addr = raw
            .trim()
            .parse()
            .map_err(|_| invalid(BIND_ADDR, raw.to_string()))?;
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

fn invalid(name: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { name, value }
}

fn parse_or(
    raw: Option<String>,
    name: &'static str,
    default: &str,
) -> Result<SocketAddr, ConfigError> {
    let value = raw.unwrap_or_else(|| default.to_string());
    value.trim().parse().map_err(|_| invalid(name, value))
}
