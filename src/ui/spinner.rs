//! Progress spinners shown while a request is in flight.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::ConsoleTheme;
use super::SpinnerHandle;

/// A spinner for one request.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Create a spinner that doesn't show (for silent mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    fn finish_line(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        let line = ConsoleTheme::new().format_success(msg);
        self.finish_line(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = ConsoleTheme::new().format_error(msg);
        self.finish_line(line);
    }

    fn finish_clear(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner_finishes() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.set_message("Sending...");
        spinner.finish_success("Report shared");
        assert!(spinner.bar.is_finished());
    }

    #[test]
    fn hidden_spinner_clears() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.finish_clear();
        assert!(spinner.bar.is_finished());
    }
}
