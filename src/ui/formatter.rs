//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Functions here have no side effects beyond printing.

use crate::domain::VersionSet;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a warning message in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Lines summarizing the new versions of a run.
///
/// - none: a warning that no new versions were found
/// - one: "New version: X"
/// - several: a note about multiple versions followed by the list
pub fn format_version_report(versions: &VersionSet) -> Vec<String> {
    match versions.len() {
        0 => vec!["Warning: no new versions found.".to_string()],
        1 => vec![format!("New version: {}", versions.as_slice()[0])],
        _ => vec![
            "Note: your application uses multiple versions.".to_string(),
            format!(
                "New versions: {}",
                versions.iter().collect::<Vec<_>>().join(", ")
            ),
        ],
    }
}

/// Print the version summary, highlighting the versions.
pub fn display_version_report(versions: &VersionSet) {
    println!();
    for line in format_version_report(versions) {
        if versions.is_empty() {
            println!("{}", style(line).yellow());
        } else {
            println!("{}", style(line).bold());
        }
    }
}
