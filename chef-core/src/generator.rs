//! Recipe generation: one prompt, one provider call, one parse.

use crate::llm::{LlmError, LlmProvider};
use crate::prompts::build_chat_request;
use crate::recipe_parser::parse_recipe_response;
use crate::types::{GeneratedRecipe, RecipeParams};

/// Generate a recipe for the collected wizard constraints.
///
/// Issues exactly one provider request. The response is parsed best-effort,
/// so an oddly formatted answer still yields a recipe with fallbacks.
pub async fn generate_recipe(
    provider: &dyn LlmProvider,
    params: &RecipeParams,
) -> Result<GeneratedRecipe, LlmError> {
    let request = build_chat_request(params);

    tracing::info!(
        provider = provider.provider_name(),
        model = provider.model_name(),
        ingredients = params.ingredients.len(),
        diet = %params.diet_type,
        style = %params.cooking_style,
        "Generating recipe"
    );

    let response = match provider.complete(&request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, category = ?e.category(), "Recipe generation failed");
            return Err(e);
        }
    };

    let recipe = parse_recipe_response(&response.content);

    tracing::info!(
        title = %recipe.title,
        steps = recipe.method.len(),
        total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
        "Recipe generated"
    );

    Ok(GeneratedRecipe {
        recipe,
        raw_response: response.content,
        usage: response.usage,
    })
}
