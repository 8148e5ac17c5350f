use thiserror::Error;

use crate::types::{DietType, Screen};

/// Ingredient entry errors. These are shown next to the input and never
/// escalate past the ingredient screen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Ingredient name too short")]
    TooShort,

    #[error("Ingredient name too long")]
    TooLong,

    #[error("Only letters and spaces allowed")]
    InvalidCharacters,

    #[error("This ingredient is already added")]
    Duplicate,

    #[error("{}", wrong_diet_message(.expected))]
    WrongDietCategory { expected: DietType },

    #[error("{}", limit_message(.diet))]
    LimitReached { diet: DietType },

    #[error("Please add at least one ingredient")]
    EmptyIngredients,

    #[error("Invalid ingredient: {0}")]
    InvalidIngredient(String),
}

fn wrong_diet_message(expected: &DietType) -> &'static str {
    match expected {
        DietType::Vegetarian => "This is a non-veg item. Switch to non-veg mode.",
        DietType::NonVegetarian => "Only non-veg items allowed in non-veg mode.",
    }
}

fn limit_message(diet: &DietType) -> &'static str {
    match diet {
        DietType::Vegetarian => "Maximum 5 vegetables allowed",
        DietType::NonVegetarian => "Only 1 non-veg item allowed",
    }
}

/// Errors from wizard operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("A screen transition is already in progress")]
    TransitionInProgress,

    #[error("Cannot {action} from the {from} screen")]
    InvalidTransition { from: Screen, action: &'static str },

    #[error("No ingredient at position {0}")]
    NoSuchIngredient(usize),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::LimitReached {
                diet: DietType::NonVegetarian
            }
            .to_string(),
            "Only 1 non-veg item allowed"
        );
        assert_eq!(
            ValidationError::WrongDietCategory {
                expected: DietType::Vegetarian
            }
            .to_string(),
            "This is a non-veg item. Switch to non-veg mode."
        );
        assert_eq!(
            WizardError::InvalidTransition {
                from: Screen::Loading,
                action: "submit ingredients"
            }
            .to_string(),
            "Cannot submit ingredients from the loading screen"
        );
    }
}
