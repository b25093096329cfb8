//! User interface module - interaction (prompts) and formatting.
//!
//! `formatter` holds the pure display functions; this module handles
//! interactive prompts and user input.

use std::io::{self, Write};

use anyhow::Result;

pub mod formatter;

pub use formatter::{
    display_classification, display_error, display_proposed_release, display_status,
    display_success, display_warning,
};

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Accepts "y" or "yes" (case-insensitive) as confirmation.
/// Default is "no" if user presses Enter.
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let answer = input.trim().to_lowercase();

    Ok(answer == "y" || answer == "yes")
}
