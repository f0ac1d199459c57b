/*!
 * Runtime Configuration
 *
 * Loaded once at startup from environment variables:
 * - TASK_MANAGER_MAX_CAPACITY: maximum tracked processes (default: 100)
 * - TASK_MANAGER_LOCK_TIMEOUT_MS: admission lock wait in ms (default: 300)
 * - TASK_MANAGER_ADDR: HTTP listen address (default: 127.0.0.1:8080)
 */

use super::errors::ConfigError;
use super::limits::{ADMISSION_LOCK_TIMEOUT, DEFAULT_LISTEN_ADDR, DEFAULT_MAX_CAPACITY};
use std::net::SocketAddr;
use std::time::Duration;

pub const ENV_MAX_CAPACITY: &str = "TASK_MANAGER_MAX_CAPACITY";
pub const ENV_LOCK_TIMEOUT_MS: &str = "TASK_MANAGER_LOCK_TIMEOUT_MS";
pub const ENV_LISTEN_ADDR: &str = "TASK_MANAGER_ADDR";

/// Task manager configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of processes in the table, immutable for the store's lifetime
    pub max_capacity: usize,
    /// Bounded wait for exclusive access during admission
    pub lock_timeout: Duration,
    /// HTTP listen address
    pub listen_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_MAX_CAPACITY,
            lock_timeout: ADMISSION_LOCK_TIMEOUT,
            listen_addr: DEFAULT_LISTEN_ADDR,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_capacity = match lookup(ENV_MAX_CAPACITY) {
            Some(raw) => parse_capacity(&raw)?,
            None => DEFAULT_MAX_CAPACITY,
        };

        let lock_timeout = match lookup(ENV_LOCK_TIMEOUT_MS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| invalid(ENV_LOCK_TIMEOUT_MS, &raw, e.to_string()))?,
            None => ADMISSION_LOCK_TIMEOUT,
        };

        let listen_addr = match lookup(ENV_LISTEN_ADDR) {
            Some(raw) => raw
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| invalid(ENV_LISTEN_ADDR, &raw, e.to_string()))?,
            None => DEFAULT_LISTEN_ADDR,
        };

        Ok(Self {
            max_capacity,
            lock_timeout,
            listen_addr,
        })
    }

}

fn parse_capacity(raw: &str) -> Result<usize, ConfigError> {
    let capacity = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| invalid(ENV_MAX_CAPACITY, raw, e.to_string()))?;

    if capacity == 0 {
        return Err(invalid(ENV_MAX_CAPACITY, raw, "must be positive".to_string()));
    }

    Ok(capacity)
}

fn invalid(key: &'static str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.lock_timeout, Duration::from_millis(300));
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_MAX_CAPACITY, "4"),
            (ENV_LOCK_TIMEOUT_MS, "50"),
            (ENV_LISTEN_ADDR, "0.0.0.0:9000"),
        ]))
        .unwrap();

        assert_eq!(config.max_capacity, 4);
        assert_eq!(config.lock_timeout, Duration::from_millis(50));
        assert_eq!(config.listen_addr.port(), 9000);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = Config::from_lookup(lookup_from(&[(ENV_MAX_CAPACITY, "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_MAX_CAPACITY,
                ..
            }
        ));
    }

    #[test]
    fn test_garbage_values_rejected() {
        assert!(Config::from_lookup(lookup_from(&[(ENV_MAX_CAPACITY, "lots")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(ENV_LOCK_TIMEOUT_MS, "-1")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[(ENV_LISTEN_ADDR, "nowhere")])).is_err());
    }
}
