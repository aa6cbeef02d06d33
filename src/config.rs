//! Server configuration from environment variables

use std::str::FromStr;
use tracing::warn;

use crate::predictor::MAX_DAYS_AHEAD;

/// API server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed by CORS (the frontend dev server)
    pub cors_origin: String,
    /// Upper bound on `days_ahead` for weight prediction, at most [`MAX_DAYS_AHEAD`]
    pub max_prediction_days: u32,
    /// Fixed seed for routine generation; entropy-seeded per request when unset
    pub routine_seed: Option<u64>,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origin: "http://localhost:5173".to_string(),
            max_prediction_days: 365,
            routine_seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            cors_origin: lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            max_prediction_days: parse_or(
                "MAX_PREDICTION_DAYS",
                lookup("MAX_PREDICTION_DAYS"),
                defaults.max_prediction_days,
            )
            .clamp(1, MAX_DAYS_AHEAD),
            routine_seed: lookup("ROUTINE_SEED").and_then(|raw| match raw.parse() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    warn!("Ignoring invalid ROUTINE_SEED value: {}", raw);
                    None
                }
            }),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {} value '{}', using default {}", key, value, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert!(config.routine_seed.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9090"),
            ("CORS_ORIGIN", "http://example.com"),
            ("MAX_PREDICTION_DAYS", "30"),
            ("ROUTINE_SEED", "42"),
            ("LOG_LEVEL", "debug"),
        ]);

        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
        assert_eq!(config.cors_origin, "http://example.com");
        assert_eq!(config.max_prediction_days, 30);
        assert_eq!(config.routine_seed, Some(42));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "eighty"),
            ("MAX_PREDICTION_DAYS", "0"),
            ("ROUTINE_SEED", "-1"),
        ]);

        assert_eq!(config.port, 8000);
        assert_eq!(config.max_prediction_days, 1);
        assert!(config.routine_seed.is_none());
    }

    #[test]
    fn test_prediction_days_capped() {
        let config = config_from(&[("MAX_PREDICTION_DAYS", "100000")]);
        assert_eq!(config.max_prediction_days, MAX_DAYS_AHEAD);
    }
}
