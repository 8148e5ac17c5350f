//! LLM configuration from environment variables.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default OpenRouter base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "tngtech/deepseek-r1t2-chimera:free";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Value shipped in the sample `.env`; treated the same as a missing key.
pub const PLACEHOLDER_API_KEY: &str = "your_openrouter_api_key_here";

/// Sent as `HTTP-Referer` so OpenRouter can attribute requests.
pub const DEFAULT_REFERER: &str = "https://chef-al-smart.app";

/// Sent as `X-Title`.
pub const APP_TITLE: &str = "Chef Al-Smart Recipe Generator";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("{0} still holds the placeholder value; add your real API key")]
    PlaceholderApiKey(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// LLM client configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key for OpenRouter.
    pub api_key: String,
    /// Model name (e.g., "openai/gpt-4o-mini").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Referer header value.
    pub referer: String,
    /// Client-side request timeout.
    pub timeout: Duration,
}

impl LlmConfig {
    /// Build a configuration from an explicit key, checking it the same way
    /// `from_env` does.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        Self::check_api_key(&api_key)?;

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENROUTER_API_KEY`: API key for OpenRouter
    ///
    /// Optional:
    /// - `CHEF_AI_MODEL`: Model name (default: "tngtech/deepseek-r1t2-chimera:free")
    /// - `CHEF_AI_BASE_URL`: API base URL (default: "https://openrouter.ai/api/v1")
    /// - `CHEF_AI_TIMEOUT_SECS`: Request timeout (default: 60)
    /// - `CHEF_AI_REFERER`: Referer header (default: "https://chef-al-smart.app")
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let mut config = Self::new(api_key.trim())?;

        if let Ok(model) = env::var("CHEF_AI_MODEL") {
            config.model = model;
        }
        if let Ok(base_url) = env::var("CHEF_AI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(referer) = env::var("CHEF_AI_REFERER") {
            config.referer = referer;
        }
        if let Ok(value) = env::var("CHEF_AI_TIMEOUT_SECS") {
            let secs: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "CHEF_AI_TIMEOUT_SECS".to_string(),
                value: value.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn check_api_key(api_key: &str) -> Result<(), ConfigError> {
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()));
        }
        if api_key.trim() == PLACEHOLDER_API_KEY {
            return Err(ConfigError::PlaceholderApiKey(
                "OPENROUTER_API_KEY".to_string(),
            ));
        }
        Ok(())
    }
}
