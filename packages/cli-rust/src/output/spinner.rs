//! Spinner for blocking operations
//!
//! Shown while the interfaces file is written and the interface restarted.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// A spinner with elapsed time, cleared when finished or dropped
pub struct CommandSpinner {
    bar: ProgressBar,
}

impl CommandSpinner {
    /// Start spinning with `message`
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        Self { bar }
    }

    /// Stop and erase the spinner line
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for CommandSpinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
