// Runtime configuration read from the environment
// Call `dotenv::dotenv()` before `Config::from_env` to pick up a .env file

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::auth::service::DEFAULT_LATENCY;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_SESSION_FILE: &str = ".tasktrove-session.json";
pub const DEV_SECRET: &str = "dev-secret-key";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Host configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP surface binds to (`TASKTROVE_ADDR`)
    pub bind_addr: SocketAddr,
    /// Bootstrap dataset; the bundled fixture when unset (`TASKTROVE_DATA`)
    pub data_path: Option<PathBuf>,
    /// Where the session survives restarts (`TASKTROVE_SESSION_FILE`)
    pub session_file: PathBuf,
    /// Token signing secret (`JWT_SECRET`)
    pub token_secret: String,
    /// Simulated auth latency (`TASKTROVE_LOGIN_DELAY_MS`)
    pub login_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_path: None,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            token_secret: DEV_SECRET.to_string(),
            login_delay: DEFAULT_LATENCY,
        }
    }
}

impl Config {
    /// Reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let bind_addr = match lookup("TASKTROVE_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "TASKTROVE_ADDR",
                value,
            })?,
            None => defaults.bind_addr,
        };

        let login_delay = match lookup("TASKTROVE_LOGIN_DELAY_MS") {
            Some(value) => value
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid {
                    key: "TASKTROVE_LOGIN_DELAY_MS",
                    value,
                })?,
            None => defaults.login_delay,
        };

        let token_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using development secret");
            defaults.token_secret.clone()
        });

        Ok(Self {
            bind_addr,
            data_path: lookup("TASKTROVE_DATA").map(PathBuf::from),
            session_file: lookup("TASKTROVE_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            token_secret,
            login_delay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr.to_string(), DEFAULT_ADDR);
    }

    #[test]
    fn values_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("TASKTROVE_ADDR", "0.0.0.0:8080"),
            ("TASKTROVE_DATA", "/tmp/data.json"),
            ("TASKTROVE_SESSION_FILE", "/tmp/session.json"),
            ("JWT_SECRET", "s3cret"),
            ("TASKTROVE_LOGIN_DELAY_MS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.data_path, Some(PathBuf::from("/tmp/data.json")));
        assert_eq!(config.session_file, PathBuf::from("/tmp/session.json"));
        assert_eq!(config.token_secret, "s3cret");
        assert_eq!(config.login_delay, Duration::ZERO);
    }

    #[test]
    fn bad_address_is_rejected() {
        let err = Config::from_lookup(lookup(&[("TASKTROVE_ADDR", "nowhere")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "TASKTROVE_ADDR",
                value: "nowhere".to_string()
            }
        );
    }

    #[test]
    fn bad_delay_is_rejected() {
        let result = Config::from_lookup(lookup(&[("TASKTROVE_LOGIN_DELAY_MS", "soon")]));
        assert!(result.is_err());
    }
}
