//! Screen navigation with a transition lock.
//!
//! The wizard moves strictly forward `Welcome → Ingredients → CookingStyle →
//! Loading → Result`, with single steps back and a reset to `Welcome` from
//! anywhere. Each accepted transition locks navigation for
//! [`TRANSITION_WINDOW`]; requests inside the window are refused.

use std::time::Duration;
use tokio::time::Instant;

use crate::error::WizardError;
use crate::types::Screen;

/// How long a transition keeps navigation locked.
pub const TRANSITION_WINDOW: Duration = Duration::from_millis(150);

/// Whether `from → to` is an edge of the wizard graph.
pub fn is_allowed(from: Screen, to: Screen) -> bool {
    use Screen::*;
    matches!(
        (from, to),
        (Welcome, Ingredients)
            | (Ingredients, CookingStyle)
            | (Ingredients, Welcome)
            | (CookingStyle, Loading)
            | (CookingStyle, Ingredients)
            | (Loading, Result)
            | (Loading, CookingStyle)
            | (Result, Welcome)
    ) || (to == Welcome && from != Welcome)
}

/// Screen to return to on a back request, if the screen has one.
///
/// `Loading` has none: going back mid-request is ignored.
pub fn back_target(from: Screen) -> Option<Screen> {
    match from {
        Screen::Welcome | Screen::Loading => None,
        Screen::Ingredients => Some(Screen::Welcome),
        Screen::CookingStyle => Some(Screen::Ingredients),
        Screen::Result => Some(Screen::Welcome),
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: Screen,
    history: Vec<Screen>,
    locked_until: Option<Instant>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Screen::Welcome,
            history: vec![Screen::Welcome],
            locked_until: None,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Screens visited since the last return to `Welcome`, oldest first.
    pub fn history(&self) -> &[Screen] {
        &self.history
    }

    pub fn locked_until(&self) -> Option<Instant> {
        self.locked_until
    }

    pub fn is_locked(&self, now: Instant) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    /// Check that `target` could be entered at `now` without moving.
    pub fn check(&self, target: Screen, action: &'static str, now: Instant) -> Result<(), WizardError> {
        if self.is_locked(now) {
            return Err(WizardError::TransitionInProgress);
        }
        if !is_allowed(self.current, target) {
            return Err(WizardError::InvalidTransition {
                from: self.current,
                action,
            });
        }
        Ok(())
    }

    /// Move to `target`, locking navigation for [`TRANSITION_WINDOW`].
    pub fn navigate(
        &mut self,
        target: Screen,
        action: &'static str,
        now: Instant,
    ) -> Result<(), WizardError> {
        self.check(target, action, now)?;

        tracing::debug!(from = %self.current, to = %target, action, "Screen transition");

        if target == Screen::Welcome {
            self.history.clear();
        }
        self.history.push(target);
        self.current = target;
        self.locked_until = Some(now + TRANSITION_WINDOW);
        Ok(())
    }
}
