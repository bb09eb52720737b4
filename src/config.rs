//! Runtime configuration, read once from the process environment at startup
//! (after `.env` has been loaded).

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_PORT: u16 = 3001;

/// The environment designator we fall back to when neither `APP_ENV` nor
/// `NODE_ENV` is set.
pub const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, so tests don't have to
    /// poke at the real process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().with_context(|| {
                format!("PORT must be a port number, got {raw:?}")
            })?,
            None => DEFAULT_PORT,
        };
        let environment = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        Ok(Config { port, environment })
    }

    /// Only development exposes internal error detail to clients.
    pub fn is_development(&self) -> bool {
        self.environment == DEFAULT_ENVIRONMENT
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(
        vars: &[(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key: &str| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_in(&[])).expect("config");
        assert_eq!(config.port, 3001);
        assert_eq!(config.environment, "development");
        assert!(config.is_development());
    }

    #[test]
    fn test_app_env_wins_over_node_env() {
        let config = Config::from_lookup(lookup_in(&[
            ("PORT", "8080"),
            ("APP_ENV", "production"),
            ("NODE_ENV", "development"),
        ]))
        .expect("config");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "production");
        assert!(!config.is_development());
    }

    #[test]
    fn test_node_env_fallback() {
        let config =
            Config::from_lookup(lookup_in(&[("NODE_ENV", "staging")]))
                .expect("config");
        assert_eq!(config.environment, "staging");
        assert!(!config.is_development());
    }

    #[test]
    fn test_bad_port() {
        let err = Config::from_lookup(lookup_in(&[("PORT", "lots")]))
            .expect_err("non-numeric port");
        assert!(err.to_string().contains("PORT"));
    }
}
