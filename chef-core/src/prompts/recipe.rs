//! Recipe generation prompt.
//!
//! The system prompt pins the output format that `recipe_parser` reads back,
//! so the section markers here and there have to stay in step.

use crate::llm::{ChatMessage, ChatRequest};
use crate::types::{CookingStyle, DietType, Language, RecipeDepth, RecipeParams};

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 2000;
pub const TOP_P: f32 = 0.9;

fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::Hinglish => {
            "Use Hinglish (Hindi words written in English script mixed with English). Do NOT use Devanagari script."
        }
        Language::English => "Use Professional English only. No regional language scripts.",
    }
}

fn style_description(style: CookingStyle) -> &'static str {
    match style {
        CookingStyle::Home => {
            "simple home-style cooking with moderate spices and easy-to-follow steps, using common household ingredients"
        }
        CookingStyle::Restaurant => {
            "restaurant-style cooking with rich flavors, professional techniques, generous use of ghee/butter/cream, and impressive presentation"
        }
    }
}

fn spice_level(style: CookingStyle) -> &'static str {
    match style {
        CookingStyle::Home => "moderate",
        CookingStyle::Restaurant => "bold and rich",
    }
}

fn depth_description(depth: RecipeDepth) -> &'static str {
    match depth {
        RecipeDepth::Quick => "Keep it concise. Quick overview with essential steps only.",
        RecipeDepth::Detailed => {
            "Provide detailed step-by-step instructions with explanations for each technique."
        }
    }
}

fn diet_description(diet: DietType) -> &'static str {
    match diet {
        DietType::Vegetarian => {
            "This is a VEGETARIAN recipe. Do not suggest any meat, fish, or egg alternatives."
        }
        DietType::NonVegetarian => {
            "This is a NON-VEGETARIAN recipe. Focus on the meat preparation and cooking."
        }
    }
}

/// Render the system prompt: persona, language rule and the strict output format.
pub fn render_system_prompt(language: Language) -> String {
    format!(
        r#"You are Chef Al-Smart, a master Indian chef with expertise in both traditional home cooking and high-end restaurant cuisine. You have deep knowledge of Indian spices, cooking techniques, and regional cuisines.

CRITICAL RULES:
1. {language_instruction}
2. NEVER use Devanagari or any non-English script.
3. Always provide accurate cooking times and nutritional estimates.
4. Automatically add essential base ingredients (spices, oil, salt) that an Indian kitchen would have.
5. Adjust recipes based on the cooking style requested (home vs restaurant).
6. Be precise with measurements and cooking instructions.
7. Include professional chef tips.

OUTPUT FORMAT (STRICT - DO NOT DEVIATE):

Title: <Creative Recipe Name>

Cooking Time: <Estimated time in minutes>

NUTRITION START
Calories: <number> kcal
Protein: <number>g
Carbs: <number>g
Fats: <number>g
NUTRITION END

Ingredients:
- <ingredient 1 with quantity>
- <ingredient 2 with quantity>
(include all auto-added base ingredients)

Method:
1. <Step 1 with clear instructions>
2. <Step 2 with clear instructions>
(continue with numbered steps)

Chef Tips:
- <Professional tip 1>
- <Professional tip 2>
(2-3 actionable tips)"#,
        language_instruction = language_instruction(language)
    )
}

/// Render the user prompt from the collected wizard constraints.
pub fn render_user_prompt(params: &RecipeParams) -> String {
    let ingredient_lines = params
        .ingredients
        .iter()
        .map(|ing| format!("- {ing}"))
        .collect::<Vec<_>>()
        .join("\n");
    let style = params.cooking_style.as_str();

    format!(
        r#"Create an authentic Indian {style}-style recipe using these main ingredients:
{ingredient_lines}

Diet Type: {diet}

Cooking Style: {style_description}

Recipe Detail Level: {depth}

Remember to:
1. Auto-add necessary base ingredients (oil/ghee, onions, tomatoes, ginger-garlic, green chilies, common Indian spices)
2. Adjust spice levels for {style} style ({spice_level})
3. Estimate accurate cooking time and nutrition
4. Provide clear, numbered cooking steps
5. Include 2-3 professional chef tips

Generate the complete recipe now following the exact format specified."#,
        diet = diet_description(params.diet_type),
        style_description = style_description(params.cooking_style),
        depth = depth_description(params.recipe_depth),
        spice_level = spice_level(params.cooking_style),
    )
}

/// Build the two-message request sent to the provider.
pub fn build_chat_request(params: &RecipeParams) -> ChatRequest {
    ChatRequest {
        messages: vec![
            ChatMessage::system(render_system_prompt(params.language)),
            ChatMessage::user(render_user_prompt(params)),
        ],
        max_tokens: Some(MAX_TOKENS),
        temperature: Some(TEMPERATURE),
        top_p: Some(TOP_P),
    }
}
