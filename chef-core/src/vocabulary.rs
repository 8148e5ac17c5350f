//! Static ingredient vocabularies.
//!
//! Loaded from `data/vocabulary.json` at compile time. List order is meaningful:
//! suggestions are returned in vocabulary order, not ranked.

use serde::Deserialize;
use std::sync::LazyLock;

use crate::types::DietType;

#[derive(Deserialize)]
struct VocabularyData {
    vegetables: Vec<String>,
    non_veg: Vec<String>,
    non_veg_keywords: Vec<String>,
    base_ingredients: BaseIngredients,
}

/// Pantry staples the model is told to add on its own.
#[derive(Debug, Deserialize)]
pub struct BaseIngredients {
    pub spices: Vec<String>,
    pub oils: Vec<String>,
    pub aromatics: Vec<String>,
    pub herbs: Vec<String>,
}

static VOCABULARY: LazyLock<VocabularyData> = LazyLock::new(|| {
    let json = include_str!("../data/vocabulary.json");
    serde_json::from_str(json).expect("Failed to parse vocabulary.json")
});

/// Vegetables offered to vegetarian users.
pub fn vegetables() -> &'static [String] {
    &VOCABULARY.vegetables
}

/// Meat, fish and egg items offered to non-vegetarian users.
pub fn non_veg_items() -> &'static [String] {
    &VOCABULARY.non_veg
}

/// Extra lower-case words that mark an ingredient as non-vegetarian
/// even though they are not offered as suggestions.
pub fn non_veg_keywords() -> &'static [String] {
    &VOCABULARY.non_veg_keywords
}

pub fn base_ingredients() -> &'static BaseIngredients {
    &VOCABULARY.base_ingredients
}

/// The vocabulary a diet type draws suggestions from.
pub fn for_diet(diet: DietType) -> &'static [String] {
    match diet {
        DietType::Vegetarian => vegetables(),
        DietType::NonVegetarian => non_veg_items(),
    }
}
