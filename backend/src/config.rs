//! # Configuration
//!
//! Environment-driven settings for the farm server. A `.env` file in the
//! working directory is loaded first when present; real environment variables
//! take precedence over it.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Raised when an environment value is present but malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allow_origin: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FarmConfig {
    pub app: String,
    pub environment: String,
    pub log_level: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Deadline applied to storage-backed requests.
    pub context_timeout: Duration,
    /// List each hungry animal once instead of once per lagging ledger slot.
    pub hunger_deduplicate: bool,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            app: "farm".to_string(),
            environment: "develop".to_string(),
            log_level: "info".to_string(),
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_allow_origin: "*".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite:farm.db".to_string(),
                max_connections: 5,
            },
            context_timeout: Duration::from_secs(7),
            hunger_deduplicate: false,
        }
    }
}

/// Load `.env` (silently ignored if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

impl FarmConfig {
    /// Build config from the process environment (call `load_dotenv()` first).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("SERVER_PORT") {
            Some(raw) => parse_port(&raw)?,
            None => defaults.server.port,
        };
        let max_connections: u32 = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                invalid("DB_MAX_CONNECTIONS", &raw, e.to_string())
            })?,
            None => defaults.database.max_connections,
        };
        let context_timeout = match get("CONTEXT_TIMEOUT") {
            Some(raw) => parse_duration("CONTEXT_TIMEOUT", &raw)?,
            None => defaults.context_timeout,
        };
        let hunger_deduplicate = match get("HUNGER_DEDUPLICATE") {
            Some(raw) => parse_bool("HUNGER_DEDUPLICATE", &raw)?,
            None => defaults.hunger_deduplicate,
        };

        Ok(Self {
            app: get("APP").unwrap_or(defaults.app),
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            server: ServerConfig {
                host: get("SERVER_HOST").unwrap_or(defaults.server.host),
                port,
                cors_allow_origin: get("CORS_ALLOW_ORIGIN")
                    .unwrap_or(defaults.server.cors_allow_origin),
            },
            database: DatabaseConfig {
                url: get("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections,
            },
            context_timeout,
            hunger_deduplicate,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.server.host, self.server.port);
        raw.parse()
            .map_err(|e: std::net::AddrParseError| invalid("SERVER_HOST", &raw, e.to_string()))
    }
}

fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    // ":8080" is accepted for compatibility with Go-style listen addresses
    raw.trim()
        .trim_start_matches(':')
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid("SERVER_PORT", raw, e.to_string()))
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, raw, "expected true or false")),
    }
}

/// Parse `500ms`, `7s` or `2m`. A bare number is read as seconds.
fn parse_duration(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let value = raw.trim();
    let (digits, unit) = match value.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => value.split_at(idx),
        None => (value, "s"),
    };
    let amount: u64 = digits
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid(key, raw, e.to_string()))?;

    match unit {
        "ms" => Ok(Duration::from_millis(amount)),
        "s" => Ok(Duration::from_secs(amount)),
        "m" => amount
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| invalid(key, raw, "duration too large")),
        other => Err(invalid(key, raw, format!("unknown unit {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<FarmConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FarmConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, FarmConfig::default());
        assert_eq!(config.context_timeout, Duration::from_secs(7));
        assert!(!config.hunger_deduplicate);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SERVER_PORT", ":9090"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("CONTEXT_TIMEOUT", "250ms"),
            ("HUNGER_DEDUPLICATE", "true"),
            ("DB_MAX_CONNECTIONS", "2"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.context_timeout, Duration::from_millis(250));
        assert!(config.hunger_deduplicate);
        assert_eq!(config.bind_addr().unwrap().port(), 9090);
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = config_from(&[("APP", "  "), ("SERVER_PORT", "")]).unwrap();
        assert_eq!(config.app, "farm");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_malformed_values_are_errors() {
        assert!(config_from(&[("SERVER_PORT", "eighty")]).is_err());
        assert!(config_from(&[("CONTEXT_TIMEOUT", "7h")]).is_err());
        assert!(config_from(&[("HUNGER_DEDUPLICATE", "maybe")]).is_err());
    }

    #[test]
    fn test_duration_units() {
        assert_eq!(parse_duration("K", "2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("K", "3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn test_minutes_overflow_is_an_error() {
        let result = parse_duration("CONTEXT_TIMEOUT", "307445734561825861m");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "CONTEXT_TIMEOUT", .. })
        ));

        let config = config_from(&[("CONTEXT_TIMEOUT", "307445734561825861m")]);
        assert!(config.is_err());
    }
}
