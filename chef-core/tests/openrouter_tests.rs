//! HTTP-level tests for the OpenRouter provider against a mock server.

use chef_core::generate_recipe;
use chef_core::llm::{
    ChatMessage, ChatRequest, LlmConfig, LlmError, LlmProvider, OpenRouterProvider, DEFAULT_MODEL,
};
use chef_core::{CookingStyle, DietType, Language, RecipeDepth, RecipeParams};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";

fn provider(server: &MockServer) -> OpenRouterProvider {
    let config = LlmConfig::new("sk-test")
        .unwrap()
        .with_base_url(format!("{}/api/v1", server.uri()))
        .with_timeout(Duration::from_millis(500));
    OpenRouterProvider::new(config).unwrap()
}

fn request() -> ChatRequest {
    ChatRequest {
        messages: vec![ChatMessage::user("Make something with potatoes")],
        max_tokens: Some(2000),
        temperature: Some(0.7),
        top_p: Some(0.9),
    }
}

async fn error_for(status: u16, body: serde_json::Value) -> LlmError {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    provider(&server).complete(&request()).await.unwrap_err()
}

#[tokio::test]
async fn test_successful_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer sk-test"))
        .and(header("x-title", "Chef Al-Smart Recipe Generator"))
        .and(header("http-referer", "https://chef-al-smart.app"))
        .and(body_partial_json(json!({
            "model": DEFAULT_MODEL,
            "max_tokens": 2000,
            "temperature": 0.7,
            "top_p": 0.9
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Title: Aloo Sabzi"}}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = provider(&server).complete(&request()).await.unwrap();
    assert_eq!(response.content, "Title: Aloo Sabzi");
    assert_eq!(response.usage.unwrap().total_tokens, 160);
}

#[tokio::test]
async fn test_unauthorized() {
    let err = error_for(401, json!({"error": {"message": "No auth credentials found"}})).await;
    assert_eq!(
        err,
        LlmError::Unauthorized {
            status: 401,
            message: "No auth credentials found".to_string()
        }
    );
}

#[tokio::test]
async fn test_quota_exhausted() {
    let err = error_for(402, json!({"error": {"message": "Insufficient credits"}})).await;
    assert_eq!(
        err,
        LlmError::QuotaExceeded {
            message: "Insufficient credits".to_string()
        }
    );
}

#[tokio::test]
async fn test_server_error() {
    let err = error_for(503, json!({"error": {"message": "Upstream unavailable"}})).await;
    assert_eq!(
        err,
        LlmError::ApiError {
            status: 503,
            message: "Upstream unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn test_rate_limited_reads_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server).complete(&request()).await.unwrap_err();
    assert_eq!(
        err,
        LlmError::RateLimited {
            retry_after_secs: Some(30)
        }
    );
}

#[tokio::test]
async fn test_missing_content_is_malformed() {
    let err = error_for(200, json!({"choices": []})).await;
    assert_eq!(
        err,
        LlmError::ParseError("Invalid response format from AI".to_string())
    );

    let err = error_for(200, json!({"choices": [{"message": {"content": null}}]})).await;
    assert!(matches!(err, LlmError::ParseError(_)));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": [{"message": {"content": "late"}}]}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = provider(&server).complete(&request()).await.unwrap_err();
    assert_eq!(err, LlmError::Timeout);
}

#[tokio::test]
async fn test_generate_recipe_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "Title: Egg Bhurji\nCooking Time: 15 minutes\nIngredients:\n- 4 Eggs\nMethod:\n1. Scramble the eggs with masala."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = RecipeParams {
        ingredients: vec!["Eggs".to_string()],
        diet_type: DietType::NonVegetarian,
        cooking_style: CookingStyle::Home,
        recipe_depth: RecipeDepth::Quick,
        language: Language::English,
    };
    let generated = generate_recipe(&provider(&server), &params).await.unwrap();
    assert_eq!(generated.recipe.title, "Egg Bhurji");
    assert_eq!(generated.recipe.ingredients, vec!["4 Eggs"]);
    assert!(generated.usage.is_none());
}
