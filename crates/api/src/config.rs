//! Environment-based configuration.
//!
//! | variable | default | meaning |
//! |---|---|---|
//! | `BIND_ADDR` | `0.0.0.0:8080` | listen address |
//! | `USE_PERSISTENT_STORES` | `false` | use Postgres instead of in-memory stores |
//! | `DATABASE_URL` | - | required when `USE_PERSISTENT_STORES=true` |
//! | `SEED_DEMO_DATA` | `false` | in-memory only: preload seasons 1-3 and sample products |
//! | `SEASON_PICKER_SEED` | - | seed for the fallback season picker (reproducible picks) |
//! | `LOG_FORMAT` | `json` | `json` or `pretty` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

use pricewise_observability::LogFormat;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Where products and seasons live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    InMemory { seed_demo_data: bool },
    Postgres { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub persistence: Persistence,
    pub season_picker_seed: Option<u64>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR, |raw| {
            raw.parse::<SocketAddr>().map_err(|e| e.to_string())
        })?;

        let persistent = parse_bool(&lookup, "USE_PERSISTENT_STORES")?;
        let persistence = if persistent {
            let database_url = lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            Persistence::Postgres { database_url }
        } else {
            Persistence::InMemory {
                seed_demo_data: parse_bool(&lookup, "SEED_DEMO_DATA")?,
            }
        };

        let season_picker_seed = match lookup("SEASON_PICKER_SEED") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "SEASON_PICKER_SEED",
                value: raw.clone(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        let log_format = parse_or(&lookup, "LOG_FORMAT", LogFormat::default(), |raw| {
            raw.parse::<LogFormat>()
        })?;

        Ok(Self {
            bind_addr,
            persistence,
            season_picker_seed,
            log_format,
        })
    }
}

fn parse_or<T, F, P>(lookup: &F, var: &'static str, default: T, parse: P) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Result<T, String>,
{
    match lookup(var) {
        Some(raw) => parse(raw.trim()).map_err(|reason| ConfigError::Invalid {
            var,
            value: raw,
            reason,
        }),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, var: &'static str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    parse_or(lookup, var, false, |raw| {
        raw.to_ascii_lowercase().parse::<bool>().map_err(|e| e.to_string())
    })
}
