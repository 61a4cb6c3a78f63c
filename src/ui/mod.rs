//! User interface module - interaction and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Waiting for the user before the window closes

use std::io;

use console::Term;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_status, display_success, display_version_report, display_warning,
    format_version_report,
};

/// Waits for a key press before the program exits.
///
/// Only pauses when stdout is an interactive terminal, so piped and CI runs
/// never block.
///
/// # Returns
/// * `Ok(true)` - The user was asked to press a key
/// * `Ok(false)` - Not attached to a terminal, nothing to wait for
/// * `Err` - If reading the key fails
pub fn pause_if_required() -> io::Result<bool> {
    let term = Term::stdout();
    if !term.is_term() {
        return Ok(false);
    }

    term.write_line("")?;
    term.write_line("Press any key to close...")?;
    term.read_key()?;
    Ok(true)
}
