use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Server configuration loaded from environment variables.
///
/// | Env Var        | Default                          |
/// |----------------|----------------------------------|
/// | `DATABASE_URL` | `sqlite://students.db?mode=rwc`  |
/// | `HOST`         | `0.0.0.0`                        |
/// | `PORT`         | `3000`                           |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://students.db?mode=rwc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value '{}' for {}", self.value, self.key)
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` if `HOST` or `PORT` cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns `ConfigError` if `HOST` or `PORT` cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let host_raw = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let host = host_raw.parse::<IpAddr>().map_err(|_| ConfigError {
            key: "HOST",
            value: host_raw.clone(),
        })?;

        let port_raw = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port_raw.parse::<u16>().map_err(|_| ConfigError {
            key: "PORT",
            value: port_raw.clone(),
        })?;

        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.key, "PORT");
        assert_eq!(err.to_string(), "invalid value 'eighty' for PORT");
    }

    #[test]
    fn test_invalid_host() {
        let err = ServerConfig::from_lookup(lookup_from(&[("HOST", "not a host")])).unwrap_err();
        assert_eq!(err.key, "HOST");
    }
}
