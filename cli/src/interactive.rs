//! Line-based terminal host for the wizard.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chef_core::{
    BackOutcome, BackSignalSender, CookingStyle, DietType, ExitAction, Language, LlmProvider,
    Notification, RecipeDepth, Screen, WizardController, WizardError, NOTIFICATION_DURATION,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use crate::render;
use crate::terminal_share::TerminalShare;

const TIP_INTERVAL: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Quit,
    Back,
    ConfirmExit(bool),
    Start(Language),
    Diet(DietType),
    Add(String),
    Remove(usize),
    Suggest(String),
    Next,
    Style(CookingStyle),
    Depth(RecipeDepth),
    Generate,
    Copy,
    Share,
    New,
    Empty,
    Unknown(String),
}

fn parse_command(screen: Screen, exit_prompt_open: bool, line: &str) -> Command {
    let line = line.trim();
    let lower = line.to_lowercase();
    let (verb, rest) = match lower.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (lower.as_str(), ""),
    };

    match verb {
        "" => return Command::Empty,
        "q" | "quit" | "exit" => return Command::Quit,
        "b" | "back" => return Command::Back,
        _ => {}
    }

    if exit_prompt_open {
        return match verb {
            "y" | "yes" => Command::ConfirmExit(true),
            "n" | "no" => Command::ConfirmExit(false),
            _ => Command::Unknown(line.to_string()),
        };
    }

    let unknown = || Command::Unknown(line.to_string());
    match screen {
        Screen::Welcome => match verb {
            "1" | "start" => Command::Start(Language::English),
            "2" => Command::Start(Language::Hinglish),
            other => other.parse().map(Command::Start).unwrap_or_else(|_| unknown()),
        },
        Screen::Ingredients => match verb {
            "diet" => rest.parse().map(Command::Diet).unwrap_or_else(|_| unknown()),
            "rm" | "remove" => match rest.parse::<usize>() {
                Ok(n) if n > 0 => Command::Remove(n - 1),
                _ => unknown(),
            },
            "next" | "done" => Command::Next,
            _ if line.starts_with('?') => Command::Suggest(line[1..].to_string()),
            _ => Command::Add(line.to_string()),
        },
        Screen::CookingStyle => match verb {
            "style" => rest.parse().map(Command::Style).unwrap_or_else(|_| unknown()),
            "depth" => rest.parse().map(Command::Depth).unwrap_or_else(|_| unknown()),
            "go" | "generate" => Command::Generate,
            _ => unknown(),
        },
        Screen::Result => match verb {
            "copy" => Command::Copy,
            "share" => Command::Share,
            "new" => Command::New,
            _ => unknown(),
        },
        Screen::Loading => unknown(),
    }
}

/// Notifications shown under each redrawn screen until they time out.
#[derive(Debug, Default)]
struct RecentNotifications {
    items: Vec<(Instant, Notification)>,
}

impl RecentNotifications {
    fn push(&mut self, at: Instant, notification: Notification) {
        self.items.push((at, notification));
    }

    fn live(&mut self, now: Instant) -> &[(Instant, Notification)] {
        self.items
            .retain(|(at, _)| now.saturating_duration_since(*at) < NOTIFICATION_DURATION);
        &self.items
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn report(error: &WizardError) {
    println!("[!] {error}");
}

/// Request a recipe, printing loading tips until the request settles.
async fn generate(wizard: &mut WizardController) -> Result<(), WizardError> {
    println!("\nCooking up your recipe...");
    let generation = wizard.submit_style();
    tokio::pin!(generation);

    let mut ticker = tokio::time::interval(TIP_INTERVAL);
    let mut tips = render::LOADING_TIPS.iter().cycle();
    loop {
        tokio::select! {
            outcome = &mut generation => return outcome.map(|_| ()),
            _ = ticker.tick() => {
                if let Some(tip) = tips.next() {
                    println!("  {tip}");
                }
            }
        }
    }
}

/// Handle a back press. Returns `true` when the user should be asked to exit.
fn back(wizard: &mut WizardController, sender: &BackSignalSender) -> bool {
    let outcomes = if sender.send() {
        wizard.poll_back_signals()
    } else {
        match wizard.go_back() {
            Ok(Some(screen)) => vec![BackOutcome::Navigated(screen)],
            Ok(None) => vec![BackOutcome::Ignored],
            Err(e) => {
                report(&e);
                vec![]
            }
        }
    };

    let mut ask_exit = false;
    for outcome in outcomes {
        match outcome {
            BackOutcome::ShowExitPrompt => ask_exit = true,
            BackOutcome::Blocked => println!("[i] Please wait a moment..."),
            BackOutcome::ShowExitHint
            | BackOutcome::Navigated(_)
            | BackOutcome::PromptDismissed
            | BackOutcome::Ignored => {}
        }
    }
    ask_exit
}

pub async fn run(provider: Arc<dyn LlmProvider>, clipboard_file: Option<PathBuf>) -> Result<()> {
    let mut wizard = WizardController::new(provider);
    let back_sender = wizard.subscribe_back_signals();
    let mut share = TerminalShare::new(clipboard_file);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut recent = RecentNotifications::default();

    print!("{}", render::screen(wizard.state()));
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let command = parse_command(wizard.screen(), wizard.exit_prompt_open(), &line);
        tracing::debug!(?command, screen = %wizard.screen(), "Terminal input");

        let screen_before = wizard.screen();
        let mut redraw = false;

        let result = match command {
            Command::Quit => break,
            Command::Empty => Ok(()),
            Command::Back => {
                if back(&mut wizard, &back_sender) {
                    println!("Are you sure you want to exit Chef Al-Smart? [y/n]");
                }
                Ok(())
            }
            Command::ConfirmExit(true) => {
                if wizard.confirm_exit() == Some(ExitAction::CloseWindow) {
                    println!("Goodbye!");
                    return Ok(());
                }
                Ok(())
            }
            Command::ConfirmExit(false) => {
                wizard.decline_exit();
                redraw = true;
                Ok(())
            }
            Command::Start(language) => wizard.start(language),
            Command::Diet(diet) => {
                redraw = true;
                wizard.set_diet_type(diet)
            }
            Command::Add(raw) => {
                redraw = true;
                wizard.add_ingredient(&raw).map(|_| ())
            }
            Command::Remove(index) => {
                redraw = true;
                wizard.remove_ingredient(index).map(|_| ())
            }
            Command::Suggest(prefix) => {
                let suggestions = wizard.suggestions(&prefix);
                if suggestions.is_empty() {
                    println!("No suggestions");
                } else {
                    println!("Suggestions: {}", suggestions.join(", "));
                }
                Ok(())
            }
            Command::Next => wizard.submit_ingredients(),
            Command::Style(style) => {
                redraw = true;
                wizard.set_cooking_style(style)
            }
            Command::Depth(depth) => {
                redraw = true;
                wizard.set_recipe_depth(depth)
            }
            Command::Generate => generate(&mut wizard).await,
            Command::Copy => wizard.copy_recipe(&mut share),
            Command::Share => match wizard.share_recipe(&mut share) {
                Ok(Some(url)) => {
                    println!("Share on WhatsApp: {url}");
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(e) => Err(e),
            },
            Command::New => wizard.new_recipe(),
            Command::Unknown(input) => {
                println!("Unrecognized input: {input}");
                Ok(())
            }
        };

        if let Err(e) = &result {
            report(e);
        }
        let fresh = wizard.take_notifications();
        let now = Instant::now();
        for notification in fresh.iter().cloned() {
            recent.push(now, notification);
        }

        wizard.settle().await;
        if redraw || wizard.screen() != screen_before {
            print!("{}", render::screen(wizard.state()));
            for (_, notification) in recent.live(Instant::now()) {
                println!("{}", render::notification(notification));
            }
        } else {
            for notification in &fresh {
                println!("{}", render::notification(notification));
            }
        }
        prompt()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chef_core::Severity;

    #[test]
    fn test_notifications_expire_after_duration() {
        let start = Instant::now();
        let mut recent = RecentNotifications::default();
        recent.push(
            start,
            Notification {
                message: "Recipe copied to clipboard!".to_string(),
                severity: Severity::Success,
            },
        );
        assert_eq!(recent.live(start + Duration::from_millis(2900)).len(), 1);
        assert!(recent.live(start + NOTIFICATION_DURATION).is_empty());
    }

    #[test]
    fn test_parse_welcome_commands() {
        assert_eq!(
            parse_command(Screen::Welcome, false, "2"),
            Command::Start(Language::Hinglish)
        );
        assert_eq!(
            parse_command(Screen::Welcome, false, "Hinglish"),
            Command::Start(Language::Hinglish)
        );
        assert_eq!(parse_command(Screen::Welcome, false, "  "), Command::Empty);
        assert_eq!(parse_command(Screen::Welcome, false, "back"), Command::Back);
    }

    #[test]
    fn test_parse_exit_prompt_answers() {
        assert_eq!(
            parse_command(Screen::Welcome, true, "y"),
            Command::ConfirmExit(true)
        );
        assert_eq!(
            parse_command(Screen::Welcome, true, "No"),
            Command::ConfirmExit(false)
        );
        assert_eq!(parse_command(Screen::Welcome, true, "b"), Command::Back);
    }

    #[test]
    fn test_parse_ingredient_commands() {
        assert_eq!(
            parse_command(Screen::Ingredients, false, "sweet potato"),
            Command::Add("sweet potato".to_string())
        );
        assert_eq!(
            parse_command(Screen::Ingredients, false, "diet non-veg"),
            Command::Diet(DietType::NonVegetarian)
        );
        assert_eq!(
            parse_command(Screen::Ingredients, false, "rm 2"),
            Command::Remove(1)
        );
        assert!(matches!(
            parse_command(Screen::Ingredients, false, "rm 0"),
            Command::Unknown(_)
        ));
        assert_eq!(
            parse_command(Screen::Ingredients, false, "?go"),
            Command::Suggest("go".to_string())
        );
        assert_eq!(parse_command(Screen::Ingredients, false, "next"), Command::Next);
    }

    #[test]
    fn test_parse_style_and_result_commands() {
        assert_eq!(
            parse_command(Screen::CookingStyle, false, "style Restaurant"),
            Command::Style(CookingStyle::Restaurant)
        );
        assert_eq!(
            parse_command(Screen::CookingStyle, false, "depth quick"),
            Command::Depth(RecipeDepth::Quick)
        );
        assert_eq!(parse_command(Screen::CookingStyle, false, "go"), Command::Generate);
        assert_eq!(parse_command(Screen::Result, false, "share"), Command::Share);
        assert!(matches!(
            parse_command(Screen::Loading, false, "go"),
            Command::Unknown(_)
        ));
    }
}
