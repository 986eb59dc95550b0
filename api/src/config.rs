use std::env;
use std::time::Duration;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Port the HTTP server binds to
    pub port: u16,
    pub database_max_connections: u32,
    pub database_connect_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_var("PORT", 8080)?,
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 10)?,
            database_connect_timeout: Duration::from_secs(parse_var(
                "DATABASE_CONNECT_TIMEOUT_SECS",
                5,
            )?),
        })
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}
