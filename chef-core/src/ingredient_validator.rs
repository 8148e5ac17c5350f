//! Ingredient entry validation.
//!
//! Everything here is pure: callers check an addition first and only then
//! mutate their list, so a rejected ingredient never touches wizard state.

use crate::error::ValidationError;
use crate::types::DietType;
use crate::vocabulary;

pub const MIN_INGREDIENT_LENGTH: usize = 2;
pub const MAX_INGREDIENT_LENGTH: usize = 30;
pub const MAX_VEG_INGREDIENTS: usize = 5;
pub const MAX_NON_VEG_INGREDIENTS: usize = 1;
pub const MAX_SUGGESTIONS: usize = 5;

/// How many ingredients a diet type allows.
pub fn max_ingredients(diet: DietType) -> usize {
    match diet {
        DietType::Vegetarian => MAX_VEG_INGREDIENTS,
        DietType::NonVegetarian => MAX_NON_VEG_INGREDIENTS,
    }
}

fn matches_vocabulary(name: &str, items: &[String]) -> bool {
    items.iter().any(|item| {
        let item = item.to_lowercase();
        name == item || name.contains(&item) || item.contains(name)
    })
}

/// Whether any word of `name` is `keyword` or its plural.
fn matches_keyword(name: &str, keyword: &str) -> bool {
    name.split(|c: char| c.is_whitespace() || c == '-')
        .any(|word| match word.strip_prefix(keyword) {
            Some(rest) => matches!(rest, "" | "s" | "es"),
            None => false,
        })
}

/// Classify an ingredient by name.
///
/// The non-veg vocabulary is checked first since it is the more specific one.
/// Names found in neither vocabulary count as vegetarian.
pub fn classify(name: &str) -> DietType {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return DietType::Vegetarian;
    }

    if matches_vocabulary(&name, vocabulary::non_veg_items())
        || vocabulary::non_veg_keywords()
            .iter()
            .any(|keyword| matches_keyword(&name, keyword))
    {
        return DietType::NonVegetarian;
    }

    // Vegetables and unknown items end up in the same bucket.
    DietType::Vegetarian
}

/// Format an ingredient name for display: "  sweet POTATO " -> "Sweet Potato".
pub fn normalize_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check the shape of a raw ingredient name and return its normalized form.
pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();

    if len < MIN_INGREDIENT_LENGTH {
        return Err(ValidationError::TooShort);
    }
    if len > MAX_INGREDIENT_LENGTH {
        return Err(ValidationError::TooLong);
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-')
    {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(normalize_name(trimmed))
}

/// Check whether `name` may be appended to `current` under `diet`.
///
/// A full list reports `LimitReached` no matter what the candidate is.
pub fn validate_addition(
    name: &str,
    current: &[String],
    diet: DietType,
) -> Result<(), ValidationError> {
    if current.len() >= max_ingredients(diet) {
        return Err(ValidationError::LimitReached { diet });
    }

    let normalized = name.trim().to_lowercase();
    if current
        .iter()
        .any(|existing| existing.trim().to_lowercase() == normalized)
    {
        return Err(ValidationError::Duplicate);
    }

    if classify(name) != diet {
        return Err(ValidationError::WrongDietCategory { expected: diet });
    }

    Ok(())
}

/// Suggest vocabulary items for a partially typed name.
pub fn suggestions(prefix: &str, diet: DietType, current: &[String]) -> Vec<&'static str> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.chars().count() < MIN_INGREDIENT_LENGTH {
        return vec![];
    }

    vocabulary::for_diet(diet)
        .iter()
        .filter(|item| {
            let lower = item.to_lowercase();
            let is_match = lower.starts_with(&prefix) || lower.contains(&prefix);
            let already_added = current.iter().any(|ing| ing.to_lowercase() == lower);
            is_match && !already_added
        })
        .take(MAX_SUGGESTIONS)
        .map(String::as_str)
        .collect()
}

/// Check a finished list before it is submitted for generation.
pub fn validate_for_recipe(ingredients: &[String]) -> Result<(), ValidationError> {
    if ingredients.is_empty() {
        return Err(ValidationError::EmptyIngredients);
    }

    for ingredient in ingredients {
        if validate_name(ingredient).is_err() {
            return Err(ValidationError::InvalidIngredient(ingredient.clone()));
        }
    }

    Ok(())
}

/// True when a list holds both vegetarian and non-vegetarian items.
pub fn has_mixed_diet_types(ingredients: &[String]) -> bool {
    if ingredients.len() <= 1 {
        return false;
    }

    let has_veg = ingredients
        .iter()
        .any(|i| classify(i) == DietType::Vegetarian);
    let has_non_veg = ingredients
        .iter()
        .any(|i| classify(i) == DietType::NonVegetarian);

    has_veg && has_non_veg
}
