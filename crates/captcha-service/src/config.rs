use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default bind address for the captcha service
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8083";

/// Default challenge lifetime in seconds
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Default challenge code length
pub const DEFAULT_CODE_LENGTH: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    /// Seconds a generated challenge stays valid
    pub captcha_ttl_seconds: u64,
    /// Characters per challenge code
    pub captcha_code_length: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}")]
    InvalidValue(&'static str),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?
            .clone();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let captcha_ttl_seconds = match vars.get("CAPTCHA_TTL_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or(ConfigError::InvalidValue("CAPTCHA_TTL_SECONDS"))?,
            None => DEFAULT_TTL_SECONDS,
        };

        let captcha_code_length = match vars.get("CAPTCHA_CODE_LENGTH") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|len| (1..=8).contains(len))
                .ok_or(ConfigError::InvalidValue("CAPTCHA_CODE_LENGTH"))?,
            None => DEFAULT_CODE_LENGTH,
        };

        Ok(Config {
            database_url,
            bind_address,
            captcha_ttl_seconds,
            captcha_code_length,
        })
    }
}
