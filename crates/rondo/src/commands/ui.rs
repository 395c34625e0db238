//! Console output helpers for consistent CLI formatting.

#![allow(dead_code)]

use console::{style, StyledObject};

/// Print a success message with green checkmark.
pub fn success(msg: impl std::fmt::Display) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info/action message with blue arrow.
pub fn info(msg: impl std::fmt::Display) {
    println!("{} {}", style("→").blue().bold(), msg);
}

/// Style text as a bundle/command name (cyan).
pub fn name(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).cyan()
}

/// Style text as dimmed/secondary.
pub fn dim(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).dim()
}
