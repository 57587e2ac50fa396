use axum::http::header::HeaderName;
use std::collections::HashMap;
use std::env;
use thiserror::Error;
use url::Url;

/// Default header carrying the caller's token
pub const DEFAULT_TOKEN_HEADER: &str = "Authorization";

/// Default bind address for the gateway
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the gateway listens on
    pub bind_address: String,
    /// Base URL requests are relayed to after the `/api` prefix is stripped
    pub upstream_url: Url,
    /// Path prefixes exempt from authentication, matched against the
    /// effective (prefix-stripped) request path. Read-only after startup.
    pub bypass_prefixes: Vec<String>,
    /// Name of the header carrying the token
    pub token_header: HeaderName,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid upstream URL: {0}")]
    InvalidUpstreamUrl(String),

    #[error("Invalid token header name: {0}")]
    InvalidTokenHeader(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let upstream_raw = vars
            .get("GATE_UPSTREAM_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("GATE_UPSTREAM_URL".to_string()))?;

        let upstream_url = Url::parse(upstream_raw)
            .map_err(|e| ConfigError::InvalidUpstreamUrl(format!("{}: {}", upstream_raw, e)))?;

        let bypass_prefixes = parse_bypass_prefixes(
            vars.get("GATE_BYPASS_PREFIXES").map(String::as_str).unwrap_or(""),
        );

        let header_raw = vars
            .get("GATE_TOKEN_HEADER")
            .cloned()
            .unwrap_or_else(|| DEFAULT_TOKEN_HEADER.to_string());

        let token_header = HeaderName::from_bytes(header_raw.as_bytes())
            .map_err(|_| ConfigError::InvalidTokenHeader(header_raw))?;

        Ok(Config {
            bind_address,
            upstream_url,
            bypass_prefixes,
            token_header,
        })
    }
}

/// Split the comma-separated bypass list, dropping empty entries.
fn parse_bypass_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars() -> HashMap<String, String> {
        HashMap::from([(
            "GATE_UPSTREAM_URL".to_string(),
            "http://127.0.0.1:9000".to_string(),
        )])
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = Config::from_vars(&base_vars()).expect("Config should load successfully");

        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.upstream_url.as_str(), "http://127.0.0.1:9000/");
        assert!(config.bypass_prefixes.is_empty());
        assert_eq!(config.token_header.as_str(), "authorization");
    }

    #[test]
    fn test_from_vars_missing_upstream() {
        let result = Config::from_vars(&HashMap::new());
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(v)) if v == "GATE_UPSTREAM_URL"));
    }

    #[test]
    fn test_from_vars_invalid_upstream() {
        let mut vars = base_vars();
        vars.insert("GATE_UPSTREAM_URL".to_string(), "not a url".to_string());

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::InvalidUpstreamUrl(_))));
    }

    #[test]
    fn test_from_vars_bypass_prefixes() {
        let mut vars = base_vars();
        vars.insert(
            "GATE_BYPASS_PREFIXES".to_string(),
            "/public, /auth/login,,/static ".to_string(),
        );

        let config = Config::from_vars(&vars).expect("Config should load successfully");
        assert_eq!(config.bypass_prefixes, vec!["/public", "/auth/login", "/static"]);
    }

    #[test]
    fn test_from_vars_custom_token_header() {
        let mut vars = base_vars();
        vars.insert("GATE_TOKEN_HEADER".to_string(), "X-Token".to_string());

        let config = Config::from_vars(&vars).expect("Config should load successfully");
        assert_eq!(config.token_header.as_str(), "x-token");
    }

    #[test]
    fn test_from_vars_invalid_token_header() {
        let mut vars = base_vars();
        vars.insert("GATE_TOKEN_HEADER".to_string(), "bad header\n".to_string());

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::InvalidTokenHeader(_))));
    }

    #[test]
    fn test_from_vars_custom_bind_address() {
        let mut vars = base_vars();
        vars.insert("BIND_ADDRESS".to_string(), "127.0.0.1:3000".to_string());

        let config = Config::from_vars(&vars).expect("Config should load successfully");
        assert_eq!(config.bind_address, "127.0.0.1:3000");
    }
}
