//! Output utilities for the CLI
//!
//! Spinner for blocking work, color styles for message boxes, and error
//! formatting shared by the wizard and the entry point.

pub mod colors;
pub mod errors;
pub mod spinner;

pub use colors::{message_style, source_style};
pub use errors::{format_apply_error, format_retry_message, show_config_error};
pub use spinner::CommandSpinner;
