//! Settings management for ifaces-wizard
//!
//! Resolves where the optional settings file lives, loads it, and validates
//! the result. Everything has a default, so no file is required.

pub mod paths;
mod schema;
mod validation;

pub use schema::{IFACE_PLACEHOLDER, Settings};
pub use validation::{
    ValidationError, ValidationWarning, format_validation_error, format_validation_warning,
    validate_settings,
};

use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The settings file to read, if there is one
///
/// An explicitly named file (argument or `IFACES_WIZARD_CONFIG`) is returned
/// whether or not it exists; the default location only when it does.
pub fn settings_file(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(paths::env_config_path)
        .or_else(|| paths::get_config_path().filter(|path| path.exists()))
}

/// Load settings from an explicit file, the environment, or the default path
///
/// A missing file at the default location yields default settings.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    match settings_file(explicit) {
        Some(path) => read_settings(&path),
        None => {
            debug!("No settings file found, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Read and parse a settings file
pub fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Validate settings, turning the first fatal issue into a [`ConfigError`]
pub fn check_settings(settings: &Settings) -> Result<Vec<ValidationWarning>, ConfigError> {
    validate_settings(settings).map_err(ConfigError::Invalid)
}
