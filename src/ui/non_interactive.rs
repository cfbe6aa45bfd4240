//! Non-interactive UI for scripted and headless use.
//!
//! Prompts are answered from `AUDIT_CONSOLE_PROMPT_<KEY>` environment
//! variables, falling back to the prompt's default.

use std::collections::HashMap;

use crate::error::{ConsoleError, Result};

use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Prefix of environment variables answering prompts.
pub const PROMPT_ENV_PREFIX: &str = "AUDIT_CONSOLE_PROMPT_";

/// UI implementation for non-interactive mode.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI reading answers from the environment.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

/// Environment variable answering the prompt with this key.
pub fn prompt_env_key(key: &str) -> String {
    format!("{}{}", PROMPT_ENV_PREFIX, key.to_uppercase().replace('-', "_"))
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let is_confirm = matches!(prompt.prompt_type, PromptType::Confirm);

        let answer = self
            .env_overrides
            .get(&prompt_env_key(&prompt.key))
            .or(prompt.default.as_ref());

        match answer {
            Some(value) if is_confirm => Ok(PromptResult::Bool(parse_bool(value))),
            Some(value) => Ok(PromptResult::String(value.clone())),
            None => Err(ConsoleError::Prompt {
                key: prompt.key.clone(),
                message: format!(
                    "cannot prompt in non-interactive mode (set {})",
                    prompt_env_key(&prompt.key)
                ),
            }),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_status() {
            println!("[{}/{}]", current, total);
        }
    }

    fn show_detail(&mut self, key: &str, value: &str) {
        if self.mode.shows_details() {
            println!("  {}: {}", key, value);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that prints its final line and nothing else.
struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        println!("  ✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  ✗ {}", msg);
    }

    fn finish_clear(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    fn ui_with(pairs: &[(&str, &str)]) -> NonInteractiveUI {
        let overrides = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NonInteractiveUI::with_overrides(OutputMode::Silent, overrides)
    }

    #[test]
    fn env_key_is_uppercased() {
        assert_eq!(prompt_env_key("to_email"), "AUDIT_CONSOLE_PROMPT_TO_EMAIL");
        assert_eq!(prompt_env_key("wizard-nav"), "AUDIT_CONSOLE_PROMPT_WIZARD_NAV");
    }

    #[test]
    fn answers_from_overrides() {
        let mut ui = ui_with(&[("AUDIT_CONSOLE_PROMPT_USERNAME", "auditor")]);
        let result = ui.prompt(&Prompt::input("username", "Username")).unwrap();
        assert_eq!(result.as_string(), "auditor");
    }

    #[test]
    fn confirm_parses_bool() {
        let mut ui = ui_with(&[("AUDIT_CONSOLE_PROMPT_CONTINUE", "yes")]);
        let result = ui.prompt(&Prompt::confirm("continue", "Continue?")).unwrap();
        assert_eq!(result.as_bool(), Some(true));
    }

    #[test]
    fn falls_back_to_default() {
        let mut ui = ui_with(&[]);
        let prompt = Prompt::select(
            "nav",
            "Go",
            vec![PromptOption::new("Next", "next"), PromptOption::new("Back", "back")],
        )
        .with_default("next");
        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "next");
    }

    #[test]
    fn missing_answer_is_an_error() {
        let mut ui = ui_with(&[]);
        let err = ui.prompt(&Prompt::password("password", "Password")).unwrap_err();
        assert!(err.to_string().contains("AUDIT_CONSOLE_PROMPT_PASSWORD"));
    }
}
