//! Process configuration, read from the environment (seeded from `.env` by the binary).

use crate::error::ConfigError;
use regex::Regex;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Connection string of the document database.
    pub database_url: String,
    /// Environment tag; names the schema that holds the collections.
    pub database_name: String,
    pub bind_addr: IpAddr,
    pub port: u16,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `DATABASE_URL` and `DATABASE_NAME` are required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let database_url = required("DATABASE_URL")?;
        let database_name = required("DATABASE_NAME")?;
        let ident = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").map_err(|e| ConfigError::Invalid {
            key: "DATABASE_NAME",
            reason: e.to_string(),
        })?;
        if !ident.is_match(&database_name) {
            return Err(ConfigError::Invalid {
                key: "DATABASE_NAME",
                reason: format!("'{}' is not a valid identifier", database_name),
            });
        }

        let bind_addr = match lookup("BIND_ADDR") {
            Some(v) => v.trim().parse::<IpAddr>().map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: format!("'{}' is not an IP address", v),
            })?,
            None => IpAddr::from([0, 0, 0, 0]),
        };
        let port = match lookup("PORT") {
            Some(v) => v.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                reason: format!("'{}' is not a port number", v),
            })?,
            None => DEFAULT_PORT,
        };
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "DATABASE_MAX_CONNECTIONS",
                    reason: format!("'{}' is not a positive integer", v),
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(AppConfig {
            database_url,
            database_name,
            bind_addr,
            port,
            max_connections,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_apply() {
        let cfg = config_from(&[("DATABASE_URL", "postgres://localhost/customers"), ("DATABASE_NAME", "dev")]).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn connection_string_and_name_are_required() {
        assert!(matches!(
            config_from(&[("DATABASE_NAME", "dev")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
        assert!(matches!(
            config_from(&[("DATABASE_URL", "postgres://localhost/c"), ("DATABASE_NAME", "  ")]),
            Err(ConfigError::Missing("DATABASE_NAME"))
        ));
    }

    #[test]
    fn rejects_bad_values() {
        let base = [("DATABASE_URL", "postgres://localhost/c"), ("DATABASE_NAME", "dev")];
        assert!(config_from(&[base[0], ("DATABASE_NAME", "drop table;")]).is_err());
        assert!(config_from(&[base[0], base[1], ("PORT", "http")]).is_err());
        assert!(config_from(&[base[0], base[1], ("DATABASE_MAX_CONNECTIONS", "0")]).is_err());
        let cfg = config_from(&[base[0], base[1], ("BIND_ADDR", "127.0.0.1"), ("PORT", "8080")]).unwrap();
        assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:8080");
    }
}
