//! Recipe share text and host share collaborators.

use thiserror::Error;

use crate::types::Recipe;

pub const WHATSAPP_SHARE_URL: &str = "https://wa.me/?text=";
pub const APP_LINK: &str = "https://chef-al-smart.app";

const FOOTER: &str = "---\nGenerated by Chef Al-Smart 🧑‍🍳\nYour Smart Recipe Companion";

/// How share text is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShareStyle {
    /// Same section markers the model is asked to produce; parses back into
    /// an equal recipe.
    Plain,
    /// Emoji-decorated text for messaging apps.
    #[default]
    Decorated,
}

/// Render a recipe as shareable text.
pub fn format_recipe_for_sharing(recipe: &Recipe, style: ShareStyle) -> String {
    match style {
        ShareStyle::Plain => format_plain(recipe),
        ShareStyle::Decorated => format_decorated(recipe),
    }
}

fn format_plain(recipe: &Recipe) -> String {
    let mut text = format!(
        "Title: {}\n\nCooking Time: {}\n\nNUTRITION START\nCalories: {}\nProtein: {}\nCarbs: {}\nFats: {}\nNUTRITION END\n\nIngredients:\n",
        recipe.title,
        recipe.cooking_time,
        recipe.nutrition.calories,
        recipe.nutrition.protein,
        recipe.nutrition.carbs,
        recipe.nutrition.fats,
    );
    for ingredient in &recipe.ingredients {
        text.push_str(&format!("- {ingredient}\n"));
    }
    text.push_str("\nMethod:\n");
    for (i, step) in recipe.method.iter().enumerate() {
        text.push_str(&format!("{}. {step}\n", i + 1));
    }
    if !recipe.chef_tips.is_empty() {
        text.push_str("\nChef Tips:\n");
        for tip in &recipe.chef_tips {
            text.push_str(&format!("- {tip}\n"));
        }
    }
    text
}

fn format_decorated(recipe: &Recipe) -> String {
    let mut text = format!(
        "🍳 *{}*\n⏱️ Cooking Time: {}\n\n📊 *Nutrition Info:*\n• Calories: {}\n• Protein: {}\n• Carbs: {}\n• Fats: {}\n\n🥘 *Ingredients:*\n",
        recipe.title,
        recipe.cooking_time,
        recipe.nutrition.calories,
        recipe.nutrition.protein,
        recipe.nutrition.carbs,
        recipe.nutrition.fats,
    );
    for ingredient in &recipe.ingredients {
        text.push_str(&format!("• {ingredient}\n"));
    }
    text.push_str("\n👨‍🍳 *Method:*\n");
    for (i, step) in recipe.method.iter().enumerate() {
        text.push_str(&format!("{}. {step}\n", i + 1));
    }
    if !recipe.chef_tips.is_empty() {
        text.push_str("\n💡 *Chef Tips:*\n");
        for tip in &recipe.chef_tips {
            text.push_str(&format!("• {tip}\n"));
        }
    }
    text.push('\n');
    text.push_str(FOOTER);
    text
}

/// WhatsApp deep link carrying the share text plus the app link.
pub fn whatsapp_share_url(text: &str) -> String {
    let message = format!("{text}\n\n🔗 Download App: {APP_LINK}");
    // wa.me expects %20 rather than '+' for spaces
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    format!("{WHATSAPP_SHARE_URL}{encoded}")
}

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Clipboard is not available: {0}")]
    ClipboardUnavailable(String),

    #[error("Sharing is not supported on this host")]
    Unsupported,

    #[error("Sharing was cancelled")]
    Cancelled,

    #[error("I/O error while sharing: {0}")]
    Io(#[from] std::io::Error),
}

/// Host-provided clipboard and native share. Failures are reported once and
/// never retried.
pub trait ShareTarget {
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), ShareError>;

    fn share(&mut self, title: &str, text: &str) -> Result<(), ShareError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_parser::parse_recipe_response;
    use crate::types::Nutrition;

    fn recipe() -> Recipe {
        Recipe {
            title: "Aloo Sabzi".to_string(),
            cooking_time: "30-40 minutes".to_string(),
            nutrition: Nutrition {
                calories: "200 kcal".to_string(),
                protein: "4g".to_string(),
                carbs: "30g".to_string(),
                fats: "5g".to_string(),
            },
            ingredients: vec!["3 Potatoes, cubed".to_string(), "1 tsp Cumin".to_string()],
            method: vec![
                "Heat oil in a kadai.".to_string(),
                "Add 2 cups of water and simmer.".to_string(),
            ],
            chef_tips: vec!["Finish with fresh coriander.".to_string()],
        }
    }

    #[test]
    fn test_plain_text_round_trips_through_parser() {
        let original = recipe();
        let text = format_recipe_for_sharing(&original, ShareStyle::Plain);
        assert_eq!(parse_recipe_response(&text), original);
    }

    #[test]
    fn test_plain_text_round_trip_with_missing_nutrition() {
        let original = Recipe {
            nutrition: Nutrition::default(),
            chef_tips: vec![],
            ..recipe()
        };
        let text = format_recipe_for_sharing(&original, ShareStyle::Plain);
        assert!(!text.contains("Chef Tips:"));
        assert_eq!(parse_recipe_response(&text), original);
    }

    #[test]
    fn test_plain_text_round_trip_keeps_awkward_items() {
        let original = Recipe {
            ingredients: vec![
                "1 cup dal".to_string(),
                "Saffron *optional*".to_string(),
                "*Kasuri methi* (optional)".to_string(),
                "Salt: to taste".to_string(),
                "- 2 green chillies".to_string(),
            ],
            method: vec![
                "2 cups water go in first.".to_string(),
                "Step 3: is a note, not a number.".to_string(),
                "Add ghee_ then stir #gently".to_string(),
            ],
            chef_tips: vec![
                "#1 rule: never rush the tadka".to_string(),
                "_Always_ rest the dal".to_string(),
                "Tips: keep it simple".to_string(),
            ],
            ..recipe()
        };
        let text = format_recipe_for_sharing(&original, ShareStyle::Plain);
        assert_eq!(parse_recipe_response(&text), original);
    }

    #[test]
    fn test_decorated_text() {
        let text = format_recipe_for_sharing(&recipe(), ShareStyle::Decorated);
        assert!(text.starts_with("🍳 *Aloo Sabzi*\n⏱️ Cooking Time: 30-40 minutes\n"));
        assert!(text.contains("• Calories: 200 kcal\n"));
        assert!(text.contains("• 3 Potatoes, cubed\n"));
        assert!(text.contains("2. Add 2 cups of water and simmer.\n"));
        assert!(text.contains("💡 *Chef Tips:*\n• Finish with fresh coriander.\n"));
        assert!(text.ends_with("Your Smart Recipe Companion"));
    }

    #[test]
    fn test_decorated_text_skips_empty_tips() {
        let text = format_recipe_for_sharing(
            &Recipe {
                chef_tips: vec![],
                ..recipe()
            },
            ShareStyle::Decorated,
        );
        assert!(!text.contains("Chef Tips"));
    }

    #[test]
    fn test_whatsapp_share_url() {
        let url = whatsapp_share_url("Aloo Sabzi & Roti");
        assert!(url.starts_with("https://wa.me/?text=Aloo%20Sabzi%20%26%20Roti%0A%0A"));
        assert!(url.ends_with("https%3A%2F%2Fchef-al-smart.app"));
        assert!(!url.contains('+'));
    }
}
