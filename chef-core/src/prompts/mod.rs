//! Prompt templates.

pub mod recipe;

pub use recipe::{build_chat_request, render_system_prompt, render_user_prompt};
