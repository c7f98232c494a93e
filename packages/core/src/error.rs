//! Error types for ifaces-wizard
//!
//! One enum per concern: running commands, persisting the interfaces file,
//! validating form input and applying a configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from spawning or draining a child process
///
/// A non-zero exit code is not an error; it is reported in
/// [`CommandResult`](crate::process::CommandResult).
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The shell could not be started
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the output pipe failed
    #[error("failed to read output of '{command}': {source}")]
    Read {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the child to exit failed
    #[error("failed to wait for '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors reading or writing the interfaces file
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("failed to back up {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Malformed values submitted through the static address form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormValidationError {
    #[error("expected {expected} values, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must not contain whitespace")]
    Whitespace { field: &'static str },
}

/// An interface name that cannot be written to the interfaces file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid interface name '{name}': {reason}")]
pub struct InvalidInterfaceName {
    pub name: String,
    pub reason: &'static str,
}

/// Errors while persisting and restarting an adapter
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Restart(#[from] ProcessError),
}

/// Errors loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid setting '{}': {}", .0.field, .0.message)]
    Invalid(crate::config::ValidationError),
}
