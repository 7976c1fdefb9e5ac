//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;

pub const DATA_PATH_VAR: &str = "BUS_DATA_PATH";
pub const BIND_ADDR_VAR: &str = "BUS_BIND_ADDR";
pub const STATIC_DIR_VAR: &str = "BUS_STATIC_DIR";
pub const RELOAD_INTERVAL_VAR: &str = "BUS_RELOAD_INTERVAL_SECS";
pub const PLAN_CACHE_TTL_VAR: &str = "BUS_PLAN_CACHE_TTL_SECS";

const DEFAULT_DATA_PATH: &str = "data/sylhet.json";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors reading the server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var}: expected a whole number of seconds, got {value:?}")]
    InvalidSeconds { var: &'static str, value: String },
}

/// Process-level settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Dataset file or directory.
    pub data_path: PathBuf,

    pub bind_addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: String,

    /// Period of the background dataset reload. `None` disables it.
    pub reload_interval: Option<Duration>,

    pub plan_cache: CacheConfig,
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value. Unset and empty variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let data_path = get(DATA_PATH_VAR).unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());

        let addr = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr.trim().parse().map_err(|_| ConfigError::InvalidAddr {
            var: BIND_ADDR_VAR,
            value: addr.clone(),
        })?;

        let static_dir = get(STATIC_DIR_VAR).unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        let reload_interval = get(RELOAD_INTERVAL_VAR)
            .map(|v| parse_seconds(RELOAD_INTERVAL_VAR, &v))
            .transpose()?
            .filter(|d| !d.is_zero());

        let mut plan_cache = CacheConfig::default();
        if let Some(v) = get(PLAN_CACHE_TTL_VAR) {
            plan_cache.ttl = parse_seconds(PLAN_CACHE_TTL_VAR, &v)?;
        }

        Ok(Self {
            data_path: PathBuf::from(data_path),
            bind_addr,
            static_dir,
            reload_interval,
            plan_cache,
        })
    }
}

fn parse_seconds(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidSeconds {
            var,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.data_path, PathBuf::from("data/sylhet.json"));
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.reload_interval, None);
        assert_eq!(config.plan_cache.ttl, Duration::from_secs(60));
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            (DATA_PATH_VAR, "/srv/network"),
            (BIND_ADDR_VAR, "0.0.0.0:8080"),
            (STATIC_DIR_VAR, "/srv/static"),
            (RELOAD_INTERVAL_VAR, "300"),
            (PLAN_CACHE_TTL_VAR, "5"),
        ])
        .unwrap();

        assert_eq!(config.data_path, PathBuf::from("/srv/network"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.static_dir, "/srv/static");
        assert_eq!(config.reload_interval, Some(Duration::from_secs(300)));
        assert_eq!(config.plan_cache.ttl, Duration::from_secs(5));
    }

    #[test]
    fn empty_values_take_defaults() {
        let config = config_from(&[(DATA_PATH_VAR, ""), (BIND_ADDR_VAR, "  ")]).unwrap();

        assert_eq!(config.data_path, PathBuf::from("data/sylhet.json"));
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn zero_reload_interval_disables_reload() {
        let config = config_from(&[(RELOAD_INTERVAL_VAR, "0")]).unwrap();
        assert_eq!(config.reload_interval, None);
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(matches!(
            config_from(&[(BIND_ADDR_VAR, "localhost")]),
            Err(ConfigError::InvalidAddr { .. })
        ));
        assert!(matches!(
            config_from(&[(RELOAD_INTERVAL_VAR, "soon")]),
            Err(ConfigError::InvalidSeconds { var: RELOAD_INTERVAL_VAR, .. })
        ));
        assert!(matches!(
            config_from(&[(PLAN_CACHE_TTL_VAR, "-1")]),
            Err(ConfigError::InvalidSeconds { .. })
        ));
    }
}
