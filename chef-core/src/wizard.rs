//! The wizard controller.
//!
//! [`WizardController`] owns the wizard state and is the only way to change
//! it. Hosts forward user actions to it, render [`WizardState`], and display
//! the queued [`Notification`]s.

use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::back_handler::{
    back_channel, BackOutcome, BackSignalSender, BackSignalSubscription, ExitAction, ExitGuard,
    EXIT_HINT,
};
use crate::error::WizardError;
use crate::generator::generate_recipe;
use crate::ingredient_validator::{self, validate_addition, validate_for_recipe, validate_name};
use crate::llm::{LlmError, LlmProvider};
use crate::navigation::{back_target, Navigator};
use crate::share::{format_recipe_for_sharing, whatsapp_share_url, ShareError, ShareStyle, ShareTarget};
use crate::types::{
    CookingStyle, DietType, GeneratedRecipe, Language, RecipeDepth, RecipeParams, Screen,
};

/// How long the host shows a notification.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

pub const RECIPE_GENERATED_MESSAGE: &str = "Recipe generated successfully!";
pub const COPIED_MESSAGE: &str = "Recipe copied to clipboard!";
pub const SHARED_MESSAGE: &str = "Recipe shared successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient message for the host to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Everything the user has chosen so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub screen: Screen,
    pub language: Language,
    pub diet_type: DietType,
    pub ingredients: Vec<String>,
    pub cooking_style: CookingStyle,
    pub recipe_depth: RecipeDepth,
    pub recipe: Option<GeneratedRecipe>,
    pub last_error: Option<String>,
}

impl WizardState {
    pub fn recipe_params(&self) -> RecipeParams {
        RecipeParams {
            ingredients: self.ingredients.clone(),
            diet_type: self.diet_type,
            cooking_style: self.cooking_style,
            recipe_depth: self.recipe_depth,
            language: self.language,
        }
    }
}

/// How a recipe request ended. Either way the wizard has already moved on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Now on `Result`.
    Generated,
    /// Back on `CookingStyle` with `last_error` set.
    Failed(LlmError),
}

#[derive(Debug)]
pub struct WizardController {
    state: WizardState,
    navigator: Navigator,
    exit_guard: ExitGuard,
    provider: Arc<dyn LlmProvider>,
    notifications: VecDeque<Notification>,
    back_signals: Option<BackSignalSubscription>,
}

impl WizardController {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            state: WizardState::default(),
            navigator: Navigator::new(),
            exit_guard: ExitGuard::new(),
            provider,
            notifications: VecDeque::new(),
            back_signals: None,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    /// Screens visited since the last return to `Welcome`.
    pub fn history(&self) -> &[Screen] {
        self.navigator.history()
    }

    fn transition(&mut self, target: Screen, action: &'static str) -> Result<(), WizardError> {
        self.navigator.navigate(target, action, Instant::now())?;
        self.state.screen = target;
        Ok(())
    }

    fn require_screen(&self, screen: Screen, action: &'static str) -> Result<(), WizardError> {
        if self.state.screen != screen {
            return Err(WizardError::InvalidTransition {
                from: self.state.screen,
                action,
            });
        }
        Ok(())
    }

    fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications
            .push_back(Notification::new(message, severity));
    }

    /// Wait until the in-flight transition has finished.
    pub async fn settle(&self) {
        if let Some(until) = self.navigator.locked_until() {
            tokio::time::sleep_until(until).await;
        }
    }

    /// Leave `Welcome` with the chosen language.
    pub fn start(&mut self, language: Language) -> Result<(), WizardError> {
        self.transition(Screen::Ingredients, "start")?;
        self.state.language = language;
        self.exit_guard.reset();
        Ok(())
    }

    /// Switch diet type. Changing it clears the ingredient list.
    pub fn set_diet_type(&mut self, diet: DietType) -> Result<(), WizardError> {
        self.require_screen(Screen::Ingredients, "change the diet type")?;
        if self.state.diet_type != diet {
            self.state.diet_type = diet;
            self.state.ingredients.clear();
        }
        Ok(())
    }

    /// Normalize, validate and append an ingredient. Returns the stored name.
    ///
    /// On any error the list is left unchanged.
    pub fn add_ingredient(&mut self, raw: &str) -> Result<String, WizardError> {
        self.require_screen(Screen::Ingredients, "add ingredients")?;
        let name = validate_name(raw)?;
        validate_addition(&name, &self.state.ingredients, self.state.diet_type)?;
        tracing::debug!(ingredient = %name, "Ingredient added");
        self.state.ingredients.push(name.clone());
        Ok(name)
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Result<String, WizardError> {
        self.require_screen(Screen::Ingredients, "remove ingredients")?;
        if index >= self.state.ingredients.len() {
            return Err(WizardError::NoSuchIngredient(index));
        }
        Ok(self.state.ingredients.remove(index))
    }

    /// Vocabulary suggestions for the current diet, minus what is already added.
    pub fn suggestions(&self, prefix: &str) -> Vec<&'static str> {
        ingredient_validator::suggestions(prefix, self.state.diet_type, &self.state.ingredients)
    }

    pub fn submit_ingredients(&mut self) -> Result<(), WizardError> {
        self.navigator
            .check(Screen::CookingStyle, "continue", Instant::now())?;
        validate_for_recipe(&self.state.ingredients)?;
        self.transition(Screen::CookingStyle, "continue")
    }

    pub fn set_cooking_style(&mut self, style: CookingStyle) -> Result<(), WizardError> {
        self.require_screen(Screen::CookingStyle, "choose a cooking style")?;
        self.state.cooking_style = style;
        Ok(())
    }

    pub fn set_recipe_depth(&mut self, depth: RecipeDepth) -> Result<(), WizardError> {
        self.require_screen(Screen::CookingStyle, "choose the recipe detail")?;
        self.state.recipe_depth = depth;
        Ok(())
    }

    /// Enter `Loading` and request a recipe.
    ///
    /// Exactly one provider call is made. The outcome transition is applied
    /// after the `Loading` transition has settled: `Result` on success, back to
    /// `CookingStyle` with an error notification on failure.
    pub async fn submit_style(&mut self) -> Result<GenerationOutcome, WizardError> {
        self.transition(Screen::Loading, "generate a recipe")?;
        self.state.recipe = None;
        self.state.last_error = None;

        let params = self.state.recipe_params();
        let result = generate_recipe(self.provider.as_ref(), &params).await;

        self.settle().await;

        match result {
            Ok(generated) => {
                self.transition(Screen::Result, "show the recipe")?;
                self.state.recipe = Some(generated);
                self.notify(RECIPE_GENERATED_MESSAGE, Severity::Success);
                Ok(GenerationOutcome::Generated)
            }
            Err(e) => {
                self.transition(Screen::CookingStyle, "return to cooking style")?;
                let message = e.user_message();
                self.state.last_error = Some(message.clone());
                self.notify(message, Severity::Error);
                Ok(GenerationOutcome::Failed(e))
            }
        }
    }

    /// Step back one screen. Returns the screen now shown, or `None` when
    /// there was nowhere to go (`Welcome`, or a request is running).
    pub fn go_back(&mut self) -> Result<Option<Screen>, WizardError> {
        match (self.state.screen, back_target(self.state.screen)) {
            (_, None) => Ok(None),
            (Screen::Result, Some(_)) => {
                self.new_recipe()?;
                Ok(Some(Screen::Welcome))
            }
            (_, Some(target)) => {
                self.transition(target, "go back")?;
                Ok(Some(target))
            }
        }
    }

    /// Start over from `Welcome`, keeping only the language.
    pub fn new_recipe(&mut self) -> Result<(), WizardError> {
        if self.state.screen != Screen::Welcome {
            self.transition(Screen::Welcome, "start over")?;
        }
        self.state = WizardState {
            language: self.state.language,
            ..WizardState::default()
        };
        self.exit_guard.reset();
        Ok(())
    }

    /// Handle one back press from the host.
    pub fn handle_back_signal(&mut self) -> BackOutcome {
        let now = Instant::now();

        if self.state.screen == Screen::Welcome {
            let outcome = self.exit_guard.press(now);
            if outcome == BackOutcome::ShowExitHint {
                self.notify(EXIT_HINT, Severity::Info);
            }
            return outcome;
        }

        if self.navigator.is_locked(now) {
            return BackOutcome::Blocked;
        }
        match self.go_back() {
            Ok(Some(screen)) => {
                self.exit_guard.reset();
                BackOutcome::Navigated(screen)
            }
            Ok(None) => BackOutcome::Ignored,
            Err(_) => BackOutcome::Blocked,
        }
    }

    /// Subscribe to host back presses. A previous subscription is dropped,
    /// so its sender stops intercepting.
    pub fn subscribe_back_signals(&mut self) -> BackSignalSender {
        let (sender, subscription) = back_channel();
        self.back_signals = Some(subscription);
        sender
    }

    pub fn unsubscribe_back_signals(&mut self) {
        self.back_signals = None;
    }

    /// Handle every back press received since the last poll.
    pub fn poll_back_signals(&mut self) -> Vec<BackOutcome> {
        let mut outcomes = Vec::new();
        loop {
            let Some(subscription) = self.back_signals.as_mut() else {
                break;
            };
            if subscription.try_next().is_none() {
                break;
            }
            outcomes.push(self.handle_back_signal());
        }
        outcomes
    }

    pub fn exit_prompt_open(&self) -> bool {
        self.exit_guard.prompt_open()
    }

    pub fn exit_hint_visible(&self) -> bool {
        self.exit_guard.hint_visible(Instant::now())
    }

    pub fn confirm_exit(&mut self) -> Option<ExitAction> {
        self.exit_guard.confirm()
    }

    pub fn decline_exit(&mut self) {
        self.exit_guard.decline();
    }

    /// Drain queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    fn current_recipe(&self, action: &'static str) -> Result<&GeneratedRecipe, WizardError> {
        self.state
            .recipe
            .as_ref()
            .ok_or(WizardError::InvalidTransition {
                from: self.state.screen,
                action,
            })
    }

    /// Copy the decorated share text to the host clipboard.
    pub fn copy_recipe(&mut self, target: &mut dyn ShareTarget) -> Result<(), WizardError> {
        let recipe = self.current_recipe("copy a recipe")?;
        let text = format_recipe_for_sharing(&recipe.recipe, ShareStyle::Decorated);

        match target.copy_to_clipboard(&text) {
            Ok(()) => self.notify(COPIED_MESSAGE, Severity::Success),
            Err(e) => {
                tracing::warn!(error = %e, "Copy to clipboard failed");
                self.notify(format!("Failed to copy recipe: {e}"), Severity::Error);
            }
        }
        Ok(())
    }

    /// Share the recipe through the host. When native sharing is unavailable
    /// the WhatsApp link is returned for the host to open instead.
    pub fn share_recipe(
        &mut self,
        target: &mut dyn ShareTarget,
    ) -> Result<Option<String>, WizardError> {
        let recipe = self.current_recipe("share a recipe")?;
        let title = recipe.recipe.title.clone();
        let text = format_recipe_for_sharing(&recipe.recipe, ShareStyle::Decorated);

        match target.share(&title, &text) {
            Ok(()) => {
                self.notify(SHARED_MESSAGE, Severity::Success);
                Ok(None)
            }
            Err(ShareError::Cancelled) => Ok(None),
            Err(e) => {
                tracing::debug!(error = %e, "Native share unavailable, using WhatsApp link");
                Ok(Some(whatsapp_share_url(&text)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::llm::FakeProvider;
    use crate::navigation::TRANSITION_WINDOW;

    fn controller() -> WizardController {
        WizardController::new(Arc::new(FakeProvider::new()))
    }

    async fn on_ingredients() -> WizardController {
        let mut wizard = controller();
        wizard.start(Language::English).unwrap();
        wizard.settle().await;
        wizard
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_locks_navigation() {
        let mut wizard = controller();
        wizard.start(Language::Hinglish).unwrap();
        assert_eq!(wizard.screen(), Screen::Ingredients);
        assert_eq!(wizard.state().language, Language::Hinglish);

        wizard.add_ingredient("potato").unwrap();
        assert_eq!(
            wizard.submit_ingredients().unwrap_err(),
            WizardError::TransitionInProgress
        );
        assert_eq!(wizard.screen(), Screen::Ingredients);

        tokio::time::advance(TRANSITION_WINDOW).await;
        wizard.submit_ingredients().unwrap();
        assert_eq!(wizard.screen(), Screen::CookingStyle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_diet_leaves_list_unchanged() {
        let mut wizard = on_ingredients().await;
        wizard.add_ingredient("Potato").unwrap();

        let err = wizard.add_ingredient("chicken").unwrap_err();
        assert_eq!(
            err,
            WizardError::Validation(ValidationError::WrongDietCategory {
                expected: DietType::Vegetarian
            })
        );
        assert_eq!(wizard.state().ingredients, vec!["Potato"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_rejected() {
        let mut wizard = on_ingredients().await;
        wizard.add_ingredient("Potato").unwrap();
        assert_eq!(
            wizard.add_ingredient(" potato ").unwrap_err(),
            WizardError::Validation(ValidationError::Duplicate)
        );
        assert_eq!(wizard.state().ingredients.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_diet_change_clears_ingredients() {
        let mut wizard = on_ingredients().await;
        wizard.add_ingredient("Onion").unwrap();
        wizard.set_diet_type(DietType::Vegetarian).unwrap();
        assert_eq!(wizard.state().ingredients.len(), 1);

        wizard.set_diet_type(DietType::NonVegetarian).unwrap();
        assert!(wizard.state().ingredients.is_empty());
        wizard.add_ingredient("Mutton").unwrap();
        assert_eq!(
            wizard.add_ingredient("Chicken").unwrap_err(),
            WizardError::Validation(ValidationError::LimitReached {
                diet: DietType::NonVegetarian
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_ingredient() {
        let mut wizard = on_ingredients().await;
        wizard.add_ingredient("Onion").unwrap();
        wizard.add_ingredient("Tomato").unwrap();
        assert_eq!(wizard.remove_ingredient(0).unwrap(), "Onion");
        assert_eq!(
            wizard.remove_ingredient(5).unwrap_err(),
            WizardError::NoSuchIngredient(5)
        );
        assert_eq!(wizard.state().ingredients, vec!["Tomato"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_empty_ingredients() {
        let mut wizard = on_ingredients().await;
        assert_eq!(
            wizard.submit_ingredients().unwrap_err(),
            WizardError::Validation(ValidationError::EmptyIngredients)
        );
        assert_eq!(wizard.screen(), Screen::Ingredients);
    }

    #[tokio::test(start_paused = true)]
    async fn test_data_entry_requires_screen() {
        let mut wizard = controller();
        assert!(matches!(
            wizard.add_ingredient("Potato"),
            Err(WizardError::InvalidTransition {
                from: Screen::Welcome,
                ..
            })
        ));
        assert!(wizard.set_cooking_style(CookingStyle::Restaurant).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_go_back_and_new_recipe() {
        let mut wizard = on_ingredients().await;
        wizard.add_ingredient("Potato").unwrap();
        wizard.submit_ingredients().unwrap();
        wizard.settle().await;
        wizard.set_cooking_style(CookingStyle::Restaurant).unwrap();

        assert_eq!(wizard.go_back().unwrap(), Some(Screen::Ingredients));
        wizard.settle().await;
        assert_eq!(wizard.state().ingredients, vec!["Potato"]);

        assert_eq!(wizard.go_back().unwrap(), Some(Screen::Welcome));
        wizard.settle().await;
        assert_eq!(wizard.go_back().unwrap(), None);

        wizard.start(Language::Hinglish).unwrap();
        wizard.settle().await;
        wizard.new_recipe().unwrap();
        assert_eq!(wizard.screen(), Screen::Welcome);
        assert!(wizard.state().ingredients.is_empty());
        assert_eq!(wizard.state().cooking_style, CookingStyle::Home);
        assert_eq!(wizard.state().language, Language::Hinglish);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_signal_on_welcome() {
        let mut wizard = controller();
        assert_eq!(wizard.handle_back_signal(), BackOutcome::ShowExitHint);
        assert!(wizard.exit_hint_visible());
        assert_eq!(
            wizard.take_notifications(),
            vec![Notification::new(EXIT_HINT, Severity::Info)]
        );

        tokio::time::advance(Duration::from_millis(1900)).await;
        assert_eq!(wizard.handle_back_signal(), BackOutcome::ShowExitPrompt);
        assert!(wizard.exit_prompt_open());
        assert_eq!(wizard.confirm_exit(), Some(ExitAction::CloseWindow));
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_signal_navigates_off_welcome() {
        let mut wizard = controller();
        wizard.start(Language::English).unwrap();
        assert_eq!(wizard.handle_back_signal(), BackOutcome::Blocked);

        wizard.settle().await;
        assert_eq!(
            wizard.handle_back_signal(),
            BackOutcome::Navigated(Screen::Welcome)
        );
        assert!(!wizard.exit_prompt_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_back_signals() {
        let mut wizard = controller();
        let sender = wizard.subscribe_back_signals();
        assert!(sender.send());
        assert!(sender.send());
        assert_eq!(
            wizard.poll_back_signals(),
            vec![BackOutcome::ShowExitHint, BackOutcome::ShowExitPrompt]
        );
        wizard.decline_exit();
        assert!(!wizard.exit_prompt_open());

        wizard.unsubscribe_back_signals();
        assert!(!sender.send());
        assert!(wizard.poll_back_signals().is_empty());
    }
}
