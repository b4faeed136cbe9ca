use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub mappings_source: String,
    pub bind_addr: SocketAddr,
    pub session_ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable lookup, applying defaults for unset names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        Ok(Self {
            database_url: text("DATABASE_URL", "sqlite://course_mapper.db?mode=rwc"),
            mappings_source: text("MAPPINGS_SOURCE", "overall_mappings.json"),
            bind_addr: parsed("BIND_ADDR", lookup("BIND_ADDR"), "127.0.0.1:3000")?,
            session_ttl_secs: parsed("SESSION_TTL_SECS", lookup("SESSION_TTL_SECS"), "86400")?,
            sweep_interval_secs: positive("SWEEP_INTERVAL_SECS", lookup("SWEEP_INTERVAL_SECS"), "3600")?,
        })
    }
}

fn parsed<T>(name: &'static str, value: Option<String>, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = value.unwrap_or_else(|| default.to_string());
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
        value,
    })
}

fn positive(name: &'static str, value: Option<String>, default: &str) -> Result<u64, ConfigError> {
    match parsed(name, value, default)? {
        0 => Err(ConfigError::Invalid {
            name,
            value: "0".to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        secs => Ok(secs),
    }
}
