//! Server settings from the process environment (after an optional `.env`).

use crate::error::ConfigError;
use std::str::FromStr;

/// Which [`TriviaStore`](crate::store::TriviaStore) backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(StoreKind::Postgres),
            "memory" | "mem" => Ok(StoreKind::Memory),
            other => Err(ConfigError::Invalid {
                key: "TRIVIA_STORE",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub schema: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub body_limit: usize,
    pub seed_categories: bool,
    pub store: StoreKind,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            database_url: "postgres://localhost/trivia".into(),
            schema: "public".into(),
            bind_addr: "127.0.0.1:5000".into(),
            max_connections: 5,
            body_limit: 64 * 1024,
            seed_categories: true,
            store: StoreKind::Postgres,
        }
    }
}

impl ServerConfig {
    /// Load `.env` if present, then read settings from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = ServerConfig::default();
        if let Some(v) = lookup("DATABASE_URL") {
            cfg.database_url = v;
        }
        if let Some(v) = lookup("TRIVIA_SCHEMA") {
            if v.trim().is_empty() {
                return Err(ConfigError::Missing("TRIVIA_SCHEMA"));
            }
            cfg.schema = v;
        }
        if let Some(v) = lookup("BIND_ADDR") {
            cfg.bind_addr = v;
        }
        if let Some(v) = lookup("DB_MAX_CONNECTIONS") {
            cfg.max_connections = parse("DB_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = lookup("BODY_LIMIT_BYTES") {
            cfg.body_limit = parse("BODY_LIMIT_BYTES", &v)?;
        }
        if let Some(v) = lookup("SEED_CATEGORIES") {
            cfg.seed_categories = parse_bool("SEED_CATEGORIES", &v)?;
        }
        if let Some(v) = lookup("TRIVIA_STORE") {
            cfg.store = v.parse()?;
        }
        Ok(cfg)
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = from_pairs(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:5000");
        assert_eq!(cfg.schema, "public");
        assert_eq!(cfg.store, StoreKind::Postgres);
        assert!(cfg.seed_categories);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = from_pairs(&[
            ("DB_MAX_CONNECTIONS", "12"),
            ("SEED_CATEGORIES", "off"),
            ("TRIVIA_STORE", "memory"),
            ("TRIVIA_SCHEMA", "trivia"),
        ])
        .unwrap();
        assert_eq!(cfg.max_connections, 12);
        assert!(!cfg.seed_categories);
        assert_eq!(cfg.store, StoreKind::Memory);
        assert_eq!(cfg.schema, "trivia");
    }

    #[test]
    fn bad_values_fail() {
        assert!(matches!(
            from_pairs(&[("BODY_LIMIT_BYTES", "lots")]),
            Err(ConfigError::Invalid { key: "BODY_LIMIT_BYTES", .. })
        ));
        assert!(from_pairs(&[("TRIVIA_STORE", "redis")]).is_err());
        assert!(matches!(from_pairs(&[("TRIVIA_SCHEMA", " ")]), Err(ConfigError::Missing(_))));
    }
}
