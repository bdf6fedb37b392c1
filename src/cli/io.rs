use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::output;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> dialoguer::Result<bool> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
}

/// Prompt for free-form text, pre-filled with `initial` when given.
pub fn prompt_text(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: Option<&str>,
) -> dialoguer::Result<String> {
    let mut input = Input::<String>::with_theme(theme).with_prompt(prompt);
    if let Some(value) = initial {
        input = input.with_initial_text(value);
    }
    input.interact_text()
}

/// Like [`prompt_text`], re-asking until `check` accepts the answer.
pub fn prompt_validated<F>(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: Option<&str>,
    check: F,
) -> dialoguer::Result<String>
where
    F: FnMut(&String) -> Result<(), String>,
{
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(check);
    if let Some(value) = initial {
        input = input.with_initial_text(value);
    }
    input.interact_text()
}

/// Pick one entry from `items`; returns its index.
pub fn select(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[String],
    default: usize,
) -> dialoguer::Result<usize> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
}
