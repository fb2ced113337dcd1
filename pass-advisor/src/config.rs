//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use crate::advisor::{AdvisorConfig, UnknownSetting};
use crate::cache::CacheConfig;
use crate::source::DataFiles;

/// Listen address variable (default `127.0.0.1:5000`).
pub const ADDR_VAR: &str = "PASS_ADVISOR_ADDR";
/// Network JSON path variable (default `network.json`).
pub const NETWORK_VAR: &str = "PASS_ADVISOR_NETWORK";
/// Roster CSV path variable (default `trains.csv`).
pub const TRAINS_VAR: &str = "PASS_ADVISOR_TRAINS";
/// Scan mode variable: `per-segment` (default) or `first-pair`.
pub const SCAN_VAR: &str = "PASS_ADVISOR_SCAN";
/// Tie-break variable: `decline` (default) or `train-id`.
pub const TIE_BREAK_VAR: &str = "PASS_ADVISOR_TIE_BREAK";
/// Occupancy cache capacity variable.
pub const CACHE_CAPACITY_VAR: &str = "PASS_ADVISOR_CACHE_CAPACITY";
/// Occupancy cache TTL variable, in seconds.
pub const CACHE_TTL_VAR: &str = "PASS_ADVISOR_CACHE_TTL_SECS";

const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 5000);

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    Setting {
        var: &'static str,
        source: UnknownSetting,
    },

    #[error("{var}: invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Everything needed to run the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub files: DataFiles,
    pub advisor: AdvisorConfig,
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
            files: DataFiles::default(),
            advisor: AdvisorConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ADDR_VAR) {
            config.addr = parse(ADDR_VAR, &value)?;
        }
        if let Some(value) = get(NETWORK_VAR) {
            config.files.network = value.into();
        }
        if let Some(value) = get(TRAINS_VAR) {
            config.files.trains = value.into();
        }
        if let Some(value) = get(SCAN_VAR) {
            config.advisor.scan_mode = value.parse().map_err(|source| ConfigError::Setting {
                var: SCAN_VAR,
                source,
            })?;
        }
        if let Some(value) = get(TIE_BREAK_VAR) {
            config.advisor.tie_break = value.parse().map_err(|source| ConfigError::Setting {
                var: TIE_BREAK_VAR,
                source,
            })?;
        }
        if let Some(value) = get(CACHE_CAPACITY_VAR) {
            config.cache.max_capacity = parse(CACHE_CAPACITY_VAR, &value)?;
        }
        if let Some(value) = get(CACHE_TTL_VAR) {
            config.cache.ttl = Duration::from_secs(parse(CACHE_TTL_VAR, &value)?);
        }

        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}
