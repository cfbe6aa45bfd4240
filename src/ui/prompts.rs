//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};

use crate::error::{ConsoleError, Result};

use super::{Prompt, PromptOption, PromptResult, PromptType};

fn prompt_error(prompt: &Prompt, e: dialoguer::Error) -> ConsoleError {
    ConsoleError::Prompt {
        key: prompt.key.clone(),
        message: e.to_string(),
    }
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Password => prompt_password(prompt, term),
        PromptType::Select { options } => prompt_select(prompt, options, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt
        .default
        .as_ref()
        .map(|s| s.to_lowercase() == "true" || s == "y" || s == "yes")
        .unwrap_or(true);

    let result = Confirm::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(|e| prompt_error(prompt, e))?;

    Ok(PromptResult::Bool(result))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = prompt_theme();
    let input = Input::<String>::with_theme(&theme)
        .with_prompt(&prompt.question)
        .allow_empty(true);

    let result: String = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .interact_on(term)
            .map_err(|e| prompt_error(prompt, e))?
    } else {
        input.interact_on(term).map_err(|e| prompt_error(prompt, e))?
    };

    Ok(PromptResult::String(result))
}

fn prompt_password(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let result = Password::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .allow_empty_password(true)
        .interact_on(term)
        .map_err(|e| prompt_error(prompt, e))?;

    Ok(PromptResult::String(result))
}

fn prompt_select(prompt: &Prompt, options: &[PromptOption], term: &Term) -> Result<PromptResult> {
    if options.is_empty() {
        return Err(ConsoleError::Prompt {
            key: prompt.key.clone(),
            message: "no options to choose from".to_string(),
        });
    }

    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

    let default_idx = prompt
        .default
        .as_ref()
        .and_then(|d| options.iter().position(|o| o.value == *d))
        .unwrap_or(0);

    let selection = Select::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(default_idx)
        .interact_on(term)
        .map_err(|e| prompt_error(prompt, e))?;

    Ok(PromptResult::String(options[selection].value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_select_is_an_error() {
        let prompt = Prompt::select("project", "Project", vec![]);
        let err = prompt_user(&prompt, &Term::stdout()).unwrap_err();
        assert!(matches!(err, ConsoleError::Prompt { ref key, .. } if key == "project"));
    }
}
