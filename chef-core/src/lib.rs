pub mod back_handler;
pub mod error;
pub mod generator;
pub mod ingredient_validator;
pub mod llm;
pub mod navigation;
pub mod prompts;
pub mod recipe_parser;
pub mod share;
pub mod types;
pub mod vocabulary;
pub mod wizard;

pub use back_handler::{
    back_channel, BackOutcome, BackSignal, BackSignalSender, BackSignalSubscription, ExitAction,
    ExitGuard, EXIT_WINDOW,
};
pub use error::{ValidationError, WizardError};
pub use generator::generate_recipe;
pub use llm::{
    create_provider_from_env, ConfigError, ErrorCategory, FakeProvider, LlmConfig, LlmError,
    LlmProvider, OpenRouterProvider,
};
pub use navigation::{Navigator, TRANSITION_WINDOW};
pub use recipe_parser::parse_recipe_response;
pub use share::{
    format_recipe_for_sharing, whatsapp_share_url, ShareError, ShareStyle, ShareTarget,
};
pub use types::{
    CookingStyle, DietType, GeneratedRecipe, Language, Nutrition, Recipe, RecipeDepth,
    RecipeParams, Screen, Usage,
};
pub use wizard::{
    GenerationOutcome, Notification, Severity, WizardController, WizardState,
    NOTIFICATION_DURATION,
};
