//! Pure formatting functions for terminal output.
//!
//! Display logic lives here, separated from interactive prompts.

use crate::classifier::{Buckets, ClassificationResult};
use crate::domain::Version;
use crate::warning::ReleaseWarning;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a release warning to the user.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display a classification summary: the bump and per-bucket entry counts.
pub fn display_classification(result: &ClassificationResult) {
    println!("\n{}", style("Commit analysis").bold());

    match &result.buckets {
        Buckets::RawOverride(text) => {
            println!("  {}", text);
        }
        Buckets::Sections(sections) => {
            println!("  Bump: {}", style(result.bump).cyan());
            for (label, entries) in [
                ("breaking", &sections.major),
                ("features", &sections.minor),
                ("fixes", &sections.patch),
            ] {
                if !entries.is_empty() {
                    println!("  {}: {}", label, entries.len());
                }
            }
        }
    }
}

/// Display the proposed release: previous tag, next version, new tag name.
pub fn display_proposed_release(latest_tag: Option<&str>, next: &Version, tag_name: &str) {
    match latest_tag {
        Some(old) => {
            println!("\n{}", style("Proposed Release:").bold());
            println!("  From: {}", style(old).red());
            println!("  To:   {} ({})", style(tag_name).green(), next);
        }
        None => {
            println!("\n{}", style("Initial Release:").bold());
            println!("  New tag: {} ({})", style(tag_name).green(), next);
        }
    }
}
