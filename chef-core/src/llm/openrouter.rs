//! OpenRouter (OpenAI-compatible) chat-completion provider.

use super::config::{ConfigError, LlmConfig, APP_TITLE};
use super::{ChatMessage, ChatRequest, ChatResponse, LlmError, LlmProvider};
use crate::types::Usage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// OpenRouter API provider.
#[derive(Debug)]
pub struct OpenRouterProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    /// Create a new provider. The configuration's timeout applies to every request.
    pub fn new(config: LlmConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { config, client })
    }
}

/// Chat-completion request body.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

/// Chat-completion response body.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Error response from the API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

/// Pull `error.message` out of an error body, falling back to the raw body.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(body) {
        return error_response.error.message;
    }
    if body.trim().is_empty() {
        format!("API request failed with status {status}")
    } else {
        body.to_string()
    }
}

fn transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: request.top_p,
        };

        tracing::debug!(model = %self.config.model, "Calling chat completions API");

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", APP_TITLE)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok());
            return Err(LlmError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let text = response.text().await.map_err(transport_error)?;

        if !(200..300).contains(&status) {
            let message = error_message(status, &text);
            return Err(match status {
                401 | 403 => LlmError::Unauthorized { status, message },
                402 => LlmError::QuotaExceeded { message },
                _ => LlmError::ApiError { status, message },
            });
        }

        let response: CompletionResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::ParseError(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LlmError::ParseError("Invalid response format from AI".to_string()))?;

        Ok(ChatResponse {
            content,
            usage: response.usage,
        })
    }

    fn provider_name(&self) -> &'static str {
        "openrouter"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_api_message() {
        let body = r#"{"error": {"message": "Insufficient credits", "code": 402}}"#;
        assert_eq!(error_message(402, body), "Insufficient credits");
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            error_message(500, ""),
            "API request failed with status 500"
        );
        assert_eq!(error_message(502, "Bad gateway"), "Bad gateway");
    }
}
