//! Centralized error formatting
//!
//! Turns core errors into the text shown in message boxes and on stderr,
//! adding a hint where the fix is predictable.

use console::style;
use ifaces_wizard_core::config::format_validation_error;
use ifaces_wizard_core::{ApplyError, ConfigError, PersistenceError, ProcessError};
use std::io::ErrorKind;
use std::path::Path;

/// Message shown before the static form is presented again
pub fn format_retry_message(error: &dyn std::fmt::Display) -> String {
    format!("Error: {error}\n\nPlease try again.")
}

/// Format an apply error with a hint when one applies
pub fn format_apply_error(e: &ApplyError) -> String {
    match e {
        ApplyError::Persistence(
            PersistenceError::Write { source, .. } | PersistenceError::Backup { source, .. },
        ) if source.kind() == ErrorKind::PermissionDenied => {
            format!(
                "{e}\n\n  {}",
                style("Run ifaces-wizard with sudo to edit the interfaces file.").cyan()
            )
        }
        ApplyError::Restart(ProcessError::Spawn { .. }) => {
            format!(
                "{e}\n\n  {}",
                style("Check the \"shell\" setting points at a working shell.").cyan()
            )
        }
        _ => e.to_string(),
    }
}

/// Format a settings error for stderr
pub fn format_config_error(e: &ConfigError) -> String {
    match e {
        ConfigError::Parse { .. } => format!(
            "{}\n\n  {e}\n\n  {} Check the settings file for syntax errors or unknown fields.",
            style("Settings error").red().bold(),
            style("Tip:").cyan()
        ),
        _ => format!("{}\n\n  {e}", style("Settings error").red().bold()),
    }
}

/// Show a settings error on stderr
///
/// `settings_file` is where the settings came from, so validation errors
/// can say which file to edit.
pub fn show_config_error(e: &ConfigError, settings_file: Option<&Path>) {
    eprintln!();
    match e {
        ConfigError::Invalid(validation) => {
            eprintln!("{}", format_validation_error(validation, settings_file))
        }
        _ => eprintln!("{}", format_config_error(e)),
    }
}
