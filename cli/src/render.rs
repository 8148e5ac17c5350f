//! Plain-text rendering of wizard screens and recipes.

use chef_core::ingredient_validator::max_ingredients;
use chef_core::vocabulary::base_ingredients;
use chef_core::wizard::{Notification, Severity, WizardState};
use chef_core::{Recipe, Screen};

pub const LOADING_TIPS: &[&str] = &[
    "Selecting the finest spices...",
    "Preparing the ingredients...",
    "Heating up the kadhai...",
    "Adding the secret masala...",
    "Simmering to perfection...",
    "Garnishing with fresh coriander...",
    "Plating your dish...",
    "Almost ready to serve...",
];

pub fn screen(state: &WizardState) -> String {
    match state.screen {
        Screen::Welcome => "\n=== Chef Al-Smart ===\nYour smart Indian recipe companion.\n\
             Choose a language: [1] English  [2] Hinglish   (q to quit)\n"
            .to_string(),
        Screen::Ingredients => {
            let limit = max_ingredients(state.diet_type);
            let mut out = format!(
                "\n--- Ingredients ({}, {}/{}) ---\n",
                state.diet_type.display_name(),
                state.ingredients.len(),
                limit
            );
            for (i, ingredient) in state.ingredients.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, ingredient));
            }
            out.push_str(
                "Type an ingredient to add it. Commands: diet veg|non-veg, rm <n>, ?<text>, next, back\n",
            );
            out
        }
        Screen::CookingStyle => {
            let base = base_ingredients();
            format!(
                "\n--- Cooking style ---\n  style: {}\n  depth: {}\n\
                 Added for you: {}, {}, {}\n\
                 Commands: style home|restaurant, depth quick|detailed, go, back\n",
                state.cooking_style,
                state.recipe_depth,
                base.oils.join("/"),
                base.aromatics.join(", "),
                base.spices.join(", ")
            )
        }
        Screen::Loading => "\nCooking up your recipe...\n".to_string(),
        Screen::Result => {
            let mut out = state
                .recipe
                .as_ref()
                .map(|generated| recipe_card(&generated.recipe))
                .unwrap_or_default();
            out.push_str("Commands: copy, share, new, back\n");
            out
        }
    }
}

pub fn recipe_card(recipe: &Recipe) -> String {
    let mut out = format!("\n*** {} ***\n", recipe.title);
    if !recipe.cooking_time.is_empty() {
        out.push_str(&format!("Cooking time: {}\n", recipe.cooking_time));
    }
    let n = &recipe.nutrition;
    out.push_str(&format!(
        "Calories {} | Protein {} | Carbs {} | Fats {}\n",
        n.calories, n.protein, n.carbs, n.fats
    ));

    out.push_str("\nIngredients:\n");
    for ingredient in &recipe.ingredients {
        out.push_str(&format!("  - {ingredient}\n"));
    }
    out.push_str("\nMethod:\n");
    for (i, step) in recipe.method.iter().enumerate() {
        out.push_str(&format!("  {}. {step}\n", i + 1));
    }
    if !recipe.chef_tips.is_empty() {
        out.push_str("\nChef tips:\n");
        for tip in &recipe.chef_tips {
            out.push_str(&format!("  * {tip}\n"));
        }
    }
    out.push('\n');
    out
}

pub fn notification(notification: &Notification) -> String {
    let prefix = match notification.severity {
        Severity::Info => "i",
        Severity::Success => "+",
        Severity::Error => "!",
    };
    format!("[{prefix}] {}", notification.message)
}
