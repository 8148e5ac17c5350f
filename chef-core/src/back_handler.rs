//! Double-back-to-exit and the host back-signal subscription.
//!
//! On the `Welcome` screen a single back press only shows a hint. A second
//! press within [`EXIT_WINDOW`] opens an exit prompt, which the user confirms
//! or declines.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::types::Screen;

/// Window in which a second back press opens the exit prompt.
pub const EXIT_WINDOW: Duration = Duration::from_secs(2);

pub const EXIT_HINT: &str = "Press back again to exit";

/// What a back signal did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Moved back to this screen.
    Navigated(Screen),
    /// First press on `Welcome`; the host shows [`EXIT_HINT`].
    ShowExitHint,
    /// Second press inside the window; the host asks for confirmation.
    ShowExitPrompt,
    /// A press while the exit prompt was open; the prompt was declined.
    PromptDismissed,
    /// Nothing to do on this screen (a recipe request is running).
    Ignored,
    /// A screen transition is still settling.
    Blocked,
}

/// The host-level action that follows a confirmed exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitAction {
    CloseWindow,
}

/// Counts back presses on the `Welcome` screen.
#[derive(Debug, Clone, Default)]
pub struct ExitGuard {
    presses: u32,
    last_press: Option<Instant>,
    prompt_open: bool,
}

impl ExitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a back press at `now`.
    pub fn press(&mut self, now: Instant) -> BackOutcome {
        if self.prompt_open {
            self.reset();
            return BackOutcome::PromptDismissed;
        }

        let within_window = self
            .last_press
            .is_some_and(|last| now.saturating_duration_since(last) < EXIT_WINDOW);

        self.last_press = Some(now);
        if within_window {
            self.presses += 1;
            if self.presses >= 2 {
                self.prompt_open = true;
                return BackOutcome::ShowExitPrompt;
            }
            BackOutcome::ShowExitHint
        } else {
            self.presses = 1;
            BackOutcome::ShowExitHint
        }
    }

    /// Whether the exit hint is still showing at `now`.
    pub fn hint_visible(&self, now: Instant) -> bool {
        !self.prompt_open
            && self
                .last_press
                .is_some_and(|last| now.saturating_duration_since(last) < EXIT_WINDOW)
    }

    pub fn prompt_open(&self) -> bool {
        self.prompt_open
    }

    /// Accept the exit prompt. `None` if no prompt is open.
    pub fn confirm(&mut self) -> Option<ExitAction> {
        if !self.prompt_open {
            return None;
        }
        self.reset();
        Some(ExitAction::CloseWindow)
    }

    pub fn decline(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One host back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackSignal;

/// Host side of the back-signal channel.
#[derive(Debug, Clone)]
pub struct BackSignalSender {
    tx: mpsc::UnboundedSender<BackSignal>,
}

impl BackSignalSender {
    /// Deliver a back press. Returns `false` once the subscription is gone,
    /// in which case the host applies its own default back behavior.
    pub fn send(&self) -> bool {
        self.tx.send(BackSignal).is_ok()
    }

    pub fn is_subscribed(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Controller side of the back-signal channel. Dropping it unsubscribes.
#[derive(Debug)]
pub struct BackSignalSubscription {
    rx: mpsc::UnboundedReceiver<BackSignal>,
}

impl BackSignalSubscription {
    /// Take the next pending signal without waiting.
    pub fn try_next(&mut self) -> Option<BackSignal> {
        self.rx.try_recv().ok()
    }
}

pub fn back_channel() -> (BackSignalSender, BackSignalSubscription) {
    let (tx, rx) = mpsc::unbounded_channel();
    (BackSignalSender { tx }, BackSignalSubscription { rx })
}
