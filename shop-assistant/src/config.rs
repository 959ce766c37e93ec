//! Service configuration

use shared::error::AppError;
use std::time::Duration;

pub const DEFAULT_PRODUCTS_API_URL: &str = "https://dummyjson.com/products";
pub const DEFAULT_COMPLETION_API_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_COMPLETION_MODEL: &str = "llama-3.3-70b-versatile";

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Product source base URL (queried with `?limit=200`)
    pub products_api_url: String,
    /// Completion provider base URL (OpenAI-compatible)
    pub completion_api_url: String,
    /// Completion provider API key
    pub completion_api_key: String,
    /// Model identifier sent with every completion request
    pub completion_model: String,
    /// Timeout for the one-shot catalog fetch
    pub catalog_timeout: Duration,
    /// Timeout for a single completion call
    pub completion_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            http_port: 8000,
            products_api_url: DEFAULT_PRODUCTS_API_URL.into(),
            completion_api_url: DEFAULT_COMPLETION_API_URL.into(),
            completion_api_key: String::new(),
            completion_model: DEFAULT_COMPLETION_MODEL.into(),
            catalog_timeout: Duration::from_secs(5),
            completion_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, AppError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(AppError::config(format!(
                        "{name} must be set in {environment} environment"
                    )));
                }
                String::new()
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(AppError::config(format!(
                "{name} must not be empty in {environment} environment"
            )));
        }
        Ok(val)
    }

    fn secs(name: &str, default: u64) -> Duration {
        Duration::from_secs(
            std::env::var(name)
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|s| *s > 0)
                .unwrap_or(default),
        )
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            products_api_url: std::env::var("PRODUCTS_API_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_PRODUCTS_API_URL.into()),
            completion_api_url: std::env::var("COMPLETION_API_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_COMPLETION_API_URL.into()),
            completion_api_key: Self::require_secret("GROQ_API_KEY", &environment)?,
            completion_model: std::env::var("COMPLETION_MODEL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.into()),
            catalog_timeout: Self::secs("CATALOG_TIMEOUT_SECS", 5),
            completion_timeout: Self::secs("COMPLETION_TIMEOUT_SECS", 30),
            environment,
        })
    }
}
