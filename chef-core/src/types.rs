//! Shared wizard and recipe types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Placeholder title used when the model response carries no `Title:` line.
pub const DEFAULT_TITLE: &str = "Chef's Special Recipe";

/// Sentinel for a nutrition value that could not be recovered.
pub const NOT_AVAILABLE: &str = "N/A";

/// Error returned when a CLI or wire value does not name a known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Implements `Display`/`FromStr` using the serde wire names plus a few aliases.
macro_rules! wire_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $wire:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.trim().to_lowercase();
                $(
                    if lower == $wire.to_lowercase() $(|| lower == $alias)* {
                        return Ok(Self::$variant);
                    }
                )+
                Err(UnknownVariant {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }
    };
}

/// Wizard screens, in linear order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    #[default]
    Welcome,
    Ingredients,
    CookingStyle,
    Loading,
    Result,
}

wire_enum!(Screen, "screen", {
    Welcome => "welcome",
    Ingredients => "ingredients",
    CookingStyle => "cookingStyle" | "cooking-style",
    Loading => "loading",
    Result => "result",
});

/// Output language of the generated recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hinglish,
}

wire_enum!(Language, "language", {
    English => "english" | "en",
    Hinglish => "hinglish" | "hi",
});

/// Diet type, which decides the ingredient vocabulary and the list limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DietType {
    #[default]
    Vegetarian,
    NonVegetarian,
}

wire_enum!(DietType, "diet type", {
    Vegetarian => "vegetarian" | "veg",
    NonVegetarian => "nonVegetarian" | "non-veg" | "nonveg" | "non-vegetarian",
});

impl DietType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::NonVegetarian => "Non-Vegetarian",
        }
    }
}

/// Flavor intensity directive sent to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookingStyle {
    #[default]
    Home,
    Restaurant,
}

wire_enum!(CookingStyle, "cooking style", {
    Home => "home",
    Restaurant => "restaurant",
});

/// Instruction verbosity directive sent to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeDepth {
    Quick,
    #[default]
    Detailed,
}

wire_enum!(RecipeDepth, "recipe depth", {
    Quick => "quick",
    Detailed => "detailed",
});

/// Estimated nutrition per serving, each value formatted with its unit or `N/A`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
}

impl Default for Nutrition {
    fn default() -> Self {
        Self {
            calories: NOT_AVAILABLE.to_string(),
            protein: NOT_AVAILABLE.to_string(),
            carbs: NOT_AVAILABLE.to_string(),
            fats: NOT_AVAILABLE.to_string(),
        }
    }
}

/// A recipe recovered from a model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub cooking_time: String,
    pub nutrition: Nutrition,
    pub ingredients: Vec<String>,
    pub method: Vec<String>,
    pub chef_tips: Vec<String>,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            cooking_time: String::new(),
            nutrition: Nutrition::default(),
            ingredients: vec![],
            method: vec![],
            chef_tips: vec![],
        }
    }
}

impl Recipe {
    /// True when the response lacked a title, ingredients or method.
    ///
    /// Callers use this to decide whether to show a "generation failed" view.
    pub fn is_incomplete(&self) -> bool {
        self.title == DEFAULT_TITLE || self.ingredients.is_empty() || self.method.is_empty()
    }
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A parsed recipe together with what the model actually returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub recipe: Recipe,
    pub raw_response: String,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// The user's constraints for one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeParams {
    pub ingredients: Vec<String>,
    pub diet_type: DietType,
    pub cooking_style: CookingStyle,
    pub recipe_depth: RecipeDepth,
    pub language: Language,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("veg".parse::<DietType>().unwrap(), DietType::Vegetarian);
        assert_eq!(
            "nonVegetarian".parse::<DietType>().unwrap(),
            DietType::NonVegetarian
        );
        assert_eq!("NON-VEG".parse::<DietType>().unwrap(), DietType::NonVegetarian);
        assert_eq!("Hinglish".parse::<Language>().unwrap(), Language::Hinglish);
        assert_eq!(
            "restaurant".parse::<CookingStyle>().unwrap(),
            CookingStyle::Restaurant
        );
        assert!("spicy".parse::<CookingStyle>().is_err());
    }

    #[test]
    fn test_wire_names_match_serde() {
        let json = serde_json::to_string(&DietType::NonVegetarian).unwrap();
        assert_eq!(json, format!("\"{}\"", DietType::NonVegetarian));

        let json = serde_json::to_string(&Screen::CookingStyle).unwrap();
        assert_eq!(json, "\"cookingStyle\"");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(CookingStyle::default(), CookingStyle::Home);
        assert_eq!(RecipeDepth::default(), RecipeDepth::Detailed);
        assert_eq!(Nutrition::default().calories, NOT_AVAILABLE);
        assert!(Recipe::default().is_incomplete());
    }
}
