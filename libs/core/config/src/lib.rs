pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env_or_default("APP_ENV", "development");

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Logging configuration consumed by [`tracing::init_tracing`]
#[derive(Clone, Debug)]
pub struct TracingConfig {
    pub environment: Environment,
    /// Level used when `RUST_LOG` is not set
    pub default_level: ::tracing::Level,
}

impl TracingConfig {
    pub fn new(environment: Environment) -> Self {
        let default_level = if environment.is_production() {
            ::tracing::Level::WARN
        } else {
            ::tracing::Level::DEBUG
        };

        Self {
            environment,
            default_level,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(Environment::Development)
    }
}

impl FromEnv for TracingConfig {
    /// Reads from environment variables:
    /// - APP_ENV: "production" selects JSON output, anything else is development
    /// - LOG_LEVEL: trace|debug|info|warn|error, defaults depend on APP_ENV
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(Environment::from_env());

        if let Ok(level) = env::var("LOG_LEVEL") {
            config.default_level =
                ::tracing::Level::from_str(&level).map_err(|e| ConfigError::ParseError {
                    key: "LOG_LEVEL".to_string(),
                    details: e.to_string(),
                })?;
        }

        Ok(config)
    }
}

/// Helper to load an environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load an environment variable or return an error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}
