//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Admin API server configuration.
///
/// Mail relay settings are read separately via
/// [`mail_relay::RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Period for the background alert checker; `None` disables it.
    pub check_interval: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ADMIN_ADDR` | Server bind address | `127.0.0.1:8787` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:quickbite.db?mode=rwc` |
    /// | `ALERT_CHECK_INTERVAL_SECS` | Background scan period in seconds, `0` to disable | `0` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("ADMIN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8787".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url =
            env::var("SQLITE_PATH").unwrap_or_else(|_| "sqlite:quickbite.db?mode=rwc".to_string());

        let interval_secs: u64 = env::var("ALERT_CHECK_INTERVAL_SECS")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidCheckInterval)?;
        let check_interval = (interval_secs > 0).then(|| Duration::from_secs(interval_secs));

        Ok(Self {
            addr,
            database_url,
            check_interval,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ADMIN_ADDR format")]
    InvalidAddr,

    #[error("Invalid ALERT_CHECK_INTERVAL_SECS value")]
    InvalidCheckInterval,
}
