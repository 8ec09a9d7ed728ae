use std::env;

use dotenv::dotenv;
use thiserror::Error;

const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} env variable must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub pool_size: u32,
    /// Put the default board in place when the store has no boards yet.
    pub seed: bool,
}

impl Settings {
    /// Reads settings from the process environment, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let pool_size = match lookup("DATABASE_POOL_SIZE") {
            Some(value) => match value.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::Invalid { name: "DATABASE_POOL_SIZE", value }),
            },
            None => DEFAULT_POOL_SIZE,
        };

        let seed = match lookup("KANBAN_SEED") {
            Some(value) => parse_flag(&value)
                .ok_or(ConfigError::Invalid { name: "KANBAN_SEED", value })?,
            None => true,
        };

        Ok(Settings { database_url, pool_size, seed })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
