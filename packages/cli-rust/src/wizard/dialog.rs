//! Dialog primitives used by the wizard
//!
//! The wizard only talks to this trait, so it can be driven by the terminal
//! implementation or by a scripted one in tests.

use anyhow::Result;

/// Result of a prompt the user can back out of
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Ok(T),
    Cancel,
    Escape,
}

impl<T> Reply<T> {
    /// The answer, or `None` on cancel/escape
    pub fn ok(self) -> Option<T> {
        match self {
            Reply::Ok(value) => Some(value),
            Reply::Cancel | Reply::Escape => None,
        }
    }
}

/// One entry of a single-choice menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuChoice {
    /// Value returned when chosen
    pub tag: String,
    /// Text shown next to the tag
    pub label: String,
}

impl MenuChoice {
    pub fn new(tag: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            label: label.into(),
        }
    }
}

/// One input of a multi-field form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    pub initial: String,
    /// Maximum input length in characters
    pub max_len: usize,
}

/// Coloring of a message box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Presentation primitives
pub trait Dialog {
    /// Confirmation prompt with custom button labels
    fn yesno(&mut self, text: &str, yes_label: &str, no_label: &str) -> Result<Reply<()>>;

    /// Single-choice menu; returns the chosen tag
    fn menu(&mut self, text: &str, choices: &[MenuChoice]) -> Result<Reply<String>>;

    /// Multi-field form; returns one value per field, in order
    fn form(&mut self, title: &str, fields: &[FormField]) -> Result<Reply<Vec<String>>>;

    /// Non-blocking progress message, shown until the next dialog call
    fn infobox(&mut self, text: &str) -> Result<()>;

    /// Blocking message the user acknowledges
    fn msgbox(&mut self, text: &str, kind: MessageKind) -> Result<()>;

    /// Clear the screen before exit
    fn clear(&mut self) -> Result<()>;
}
