//! Color utilities for CLI output
//!
//! Provides consistent styling for message boxes and interface states.

use crate::wizard::MessageKind;
use console::{Style, StyledObject};

/// Style for the headline of a message box
///
/// - Success -> green bold
/// - Error -> red bold
pub fn message_style(kind: MessageKind) -> Style {
    match kind {
        MessageKind::Success => Style::new().green().bold(),
        MessageKind::Error => Style::new().red().bold(),
    }
}

/// Style an address source for summaries
///
/// - "static" -> yellow
/// - "dhcp" -> green
/// - other -> dim
pub fn source_style(source: &str) -> StyledObject<String> {
    let style = match source.to_lowercase().as_str() {
        "static" => Style::new().yellow(),
        "dhcp" => Style::new().green(),
        _ => Style::new().dim(),
    };
    style.apply_to(source.to_string())
}
