//! Configuration Module
//!
//! Loads server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// How request failures are translated into status codes.
///
/// `Legacy` is the default and matches the documented API table: 404 for
/// lookups and listing, 500 for every other failure. `Refined` answers
/// 400 / 409 / 404 where legacy would send 500.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// 404 / 400 / 409 / 500 depending on the failure
    Refined,
    /// 404 for lookups, 500 for everything else
    #[default]
    Legacy,
}

impl FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refined" => Ok(StatusPolicy::Refined),
            "legacy" => Ok(StatusPolicy::Legacy),
            other => Err(format!("unknown status policy: {other}")),
        }
    }
}

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of records the store holds before evicting
    pub max_entries: usize,
    /// Seconds a record lives in the store
    pub default_ttl: u64,
    /// Seconds between expiry sweeps
    pub cleanup_interval: u64,
    /// Status code mapping for failed requests
    pub status_policy: StatusPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `MAX_ENTRIES` - Store capacity (default: 10000)
    /// - `DEFAULT_TTL` - Record lifetime in seconds (default: 3600)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 30)
    /// - `STATUS_CODES` - `legacy` or `refined` (default: legacy)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: var_or("SERVER_PORT", defaults.server_port),
            max_entries: var_or("MAX_ENTRIES", defaults.max_entries),
            default_ttl: var_or("DEFAULT_TTL", defaults.default_ttl),
            cleanup_interval: var_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            status_policy: var_or("STATUS_CODES", defaults.status_policy),
        }
    }
}

fn var_or<T: FromStr>(name: &str, fallback: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            max_entries: 10_000,
            default_ttl: 3600,
            cleanup_interval: 30,
            status_policy: StatusPolicy::Legacy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.max_entries, 10_000);
        assert_eq!(config.default_ttl, 3600);
        assert_eq!(config.cleanup_interval, 30);
        assert_eq!(config.status_policy, StatusPolicy::Legacy);
    }

    #[test]
    fn test_status_policy_parse() {
        assert_eq!("legacy".parse::<StatusPolicy>(), Ok(StatusPolicy::Legacy));
        assert_eq!(" Refined ".parse::<StatusPolicy>(), Ok(StatusPolicy::Refined));
        assert!("strict".parse::<StatusPolicy>().is_err());
    }

    #[test]
    fn test_var_or_falls_back_on_garbage() {
        env::set_var("TRAINING_LOG_TEST_PORT", "not-a-port");
        assert_eq!(var_or::<u16>("TRAINING_LOG_TEST_PORT", 42), 42);
        env::set_var("TRAINING_LOG_TEST_PORT", "9000");
        assert_eq!(var_or::<u16>("TRAINING_LOG_TEST_PORT", 42), 9000);
        env::remove_var("TRAINING_LOG_TEST_PORT");
    }
}
