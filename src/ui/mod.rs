//! Interactive user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for scripted and headless use
//! - [`MockUI`] for tests
//! - Prompts, spinners and the page renderer
//!
//! # Example
//!
//! ```
//! use audit_console::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Audit Console");
//! ui.success("Logged in");
//! ```

pub mod activity;
pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod page_view;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use activity::ActivityUI;
pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use page_view::render_page;
pub use prompts::prompt_user;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ConsoleTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show progress (e.g., "Step 2 of 3").
    fn show_progress(&mut self, current: usize, total: usize);

    /// Show one key/value pair of a record.
    fn show_detail(&mut self, key: &str, value: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Remove the spinner without a final line.
    fn finish_clear(&mut self);
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for scripted answers).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Default value if user just presses enter.
    pub default: Option<String>,
}

impl Prompt {
    /// A free-form text prompt.
    pub fn input(key: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            prompt_type: PromptType::Input,
            default: None,
        }
    }

    /// A hidden text prompt.
    pub fn password(key: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            prompt_type: PromptType::Password,
            ..Self::input(key, question)
        }
    }

    /// A yes/no prompt.
    pub fn confirm(key: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            prompt_type: PromptType::Confirm,
            ..Self::input(key, question)
        }
    }

    /// A single-choice prompt.
    pub fn select(
        key: impl Into<String>,
        question: impl Into<String>,
        options: Vec<PromptOption>,
    ) -> Self {
        Self {
            prompt_type: PromptType::Select { options },
            ..Self::input(key, question)
        }
    }

    /// Set the default answer.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// The type of prompt.
#[derive(Debug, Clone)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
    /// Free-form text input.
    Input,
    /// Text input that is not echoed.
    Password,
    /// Select one from a list of options.
    Select { options: Vec<PromptOption> },
}

/// An option in a select prompt.
#[derive(Debug, Clone)]
pub struct PromptOption {
    /// Display label.
    pub label: String,
    /// Value returned when selected.
    pub value: String,
}

impl PromptOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Result of a prompt.
#[derive(Debug, Clone)]
pub enum PromptResult {
    /// Boolean result from confirm.
    Bool(bool),
    /// String result from input, password or select.
    String(String),
}

impl PromptResult {
    /// Get as string.
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Get as bool if this is a Bool result.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}
