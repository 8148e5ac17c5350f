//! LLM provider abstraction for recipe generation.
//!
//! This module provides a trait-based abstraction over chat-completion providers
//! (OpenRouter in production, a canned fake in tests).

mod config;
mod fake;
mod openrouter;
mod types;

pub use config::{ConfigError, LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, PLACEHOLDER_API_KEY};
pub use fake::FakeProvider;
pub use openrouter::OpenRouterProvider;
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for LLM operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API request timed out")]
    Timeout,

    #[error("Authentication failed ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Quota exhausted: {message}")]
    QuotaExceeded { message: String },

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Coarse failure classes surfaced to the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or placeholder credential. Nothing was sent.
    Configuration,
    /// The request never got an HTTP answer.
    Network,
    /// The API answered with a non-2xx status.
    Api,
    /// The API answered 2xx without completion text.
    MalformedResponse,
}

impl LlmError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotConfigured(_) => ErrorCategory::Configuration,
            Self::RequestFailed(_) | Self::Timeout => ErrorCategory::Network,
            Self::Unauthorized { .. }
            | Self::QuotaExceeded { .. }
            | Self::RateLimited { .. }
            | Self::ApiError { .. } => ErrorCategory::Api,
            Self::ParseError(_) => ErrorCategory::MalformedResponse,
        }
    }

    /// Human-readable message for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured(_) => "API configuration error. Please check your settings.".into(),
            Self::RequestFailed(_) => "Network error. Please check your internet connection.".into(),
            Self::Timeout => "The chef is taking too long to respond. Please try again.".into(),
            Self::Unauthorized { .. } => {
                "Authentication failed. Please check your API key.".into()
            }
            Self::QuotaExceeded { .. } => {
                "API quota exhausted. Please check your plan or try again later.".into()
            }
            Self::RateLimited {
                retry_after_secs: Some(secs),
            } => format!("Too many requests. Please wait {secs} seconds and try again."),
            Self::RateLimited { .. } => {
                "Too many requests. Please wait a moment and try again.".into()
            }
            Self::ApiError { .. } | Self::ParseError(_) => {
                "Failed to generate recipe. Please try again.".into()
            }
        }
    }
}

/// Trait for LLM providers.
///
/// Implementations make exactly one API call per `complete` and never retry.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a chat request and get the model's text response.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError>;

    /// Get the provider name (e.g., "openrouter", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "tngtech/deepseek-r1t2-chimera:free").
    fn model_name(&self) -> &str;
}

/// Build the production provider from environment configuration.
///
/// Fails fast on a missing or placeholder API key, before any network call.
pub fn create_provider_from_env() -> Result<OpenRouterProvider, ConfigError> {
    let config = LlmConfig::from_env()?;
    OpenRouterProvider::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            LlmError::NotConfigured("x".into()).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(LlmError::Timeout.category(), ErrorCategory::Network);
        assert_eq!(
            LlmError::QuotaExceeded {
                message: "no credits".into()
            }
            .category(),
            ErrorCategory::Api
        );
        assert_eq!(
            LlmError::ParseError("empty".into()).category(),
            ErrorCategory::MalformedResponse
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            LlmError::RequestFailed("dns".into()).user_message(),
            "Network error. Please check your internet connection."
        );
        assert_eq!(
            LlmError::RateLimited {
                retry_after_secs: Some(30)
            }
            .user_message(),
            "Too many requests. Please wait 30 seconds and try again."
        );
        assert_eq!(
            LlmError::ApiError {
                status: 500,
                message: "boom".into()
            }
            .user_message(),
            "Failed to generate recipe. Please try again."
        );
    }
}
