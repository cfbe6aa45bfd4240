//! Running a wizard through a [`UserInterface`].
//!
//! Each round shows the current step, asks for every field on it (pre-filled
//! with what was entered before) and then asks where to go.

use crate::error::Result;
use crate::http::FormClient;
use crate::page::Page;
use crate::ui::{Prompt, PromptOption, UserInterface};

use super::controller::{SubmitOutcome, Wizard};
use super::render::{RenderedField, Widget};

/// Prompt key of the navigation question.
pub const NAV_KEY: &str = "wizard_nav";

/// How a wizard run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// The report was created.
    Created { id: Option<String> },
    /// The user dismissed the wizard.
    Cancelled,
    /// A non-interactive run could not make progress.
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Back,
    Next,
    Submit,
    Cancel,
    /// Unrecognised answer; the step is shown again.
    Stay,
}

impl Move {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "back" => Some(Self::Back),
            "next" => Some(Self::Next),
            "submit" => Some(Self::Submit),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Drive the wizard until it is submitted or dismissed.
pub fn run_wizard(
    wizard: &mut Wizard,
    client: &FormClient,
    page: &mut Page,
    ui: &mut dyn UserInterface,
) -> Result<WizardOutcome> {
    loop {
        show_step(wizard, ui);
        fill_step(wizard, page, ui)?;

        match ask_move(wizard, ui)? {
            Move::Back => wizard.back(),
            Move::Next => {
                if !wizard.next(page) {
                    show_message(page, ui);
                    if !ui.is_interactive() {
                        return Ok(WizardOutcome::Abandoned);
                    }
                }
            }
            Move::Submit => {
                let mut spinner = ui.start_spinner(wizard.control().busy_label());
                let outcome = wizard.submit(client, page);
                spinner.finish_clear();

                match outcome {
                    SubmitOutcome::Created { id } => return Ok(WizardOutcome::Created { id }),
                    SubmitOutcome::Invalid(_) | SubmitOutcome::Failed(_) => {
                        show_message(page, ui);
                        if !ui.is_interactive() {
                            return Ok(WizardOutcome::Abandoned);
                        }
                    }
                }
            }
            Move::Cancel => {
                page.clear_errors();
                return Ok(WizardOutcome::Cancelled);
            }
            Move::Stay => {
                if !ui.is_interactive() {
                    return Ok(WizardOutcome::Abandoned);
                }
            }
        }
    }
}

fn show_step(wizard: &Wizard, ui: &mut dyn UserInterface) {
    let view = wizard.view();
    if let Some(step) = view.visible_step() {
        ui.show_header(step.title);
    }
    ui.show_progress(wizard.state().current_step() + 1, wizard.state().step_count());
}

fn fill_step(wizard: &mut Wizard, page: &Page, ui: &mut dyn UserInterface) -> Result<()> {
    let fields: Vec<RenderedField> = wizard.current().fields.clone();
    if fields.is_empty() {
        ui.message("Nothing to fill in on this step.");
    }

    for field in &fields {
        if let Some(error) = page.field_error(field.error_slot()) {
            ui.warning(&format!("{}: {}", field.label, error));
        }

        let current = wizard
            .state()
            .get(&field.name)
            .map(|value| value.as_input())
            .unwrap_or_default();

        let answer = ui.prompt(&field_prompt(field, current))?.as_string();
        wizard.set_input(&field.name, &answer);
    }
    Ok(())
}

fn field_prompt(field: &RenderedField, current: String) -> Prompt {
    let prompt = match &field.widget {
        Widget::Select { options } => Prompt::select(
            field.name.as_str(),
            field.label.as_str(),
            options
                .iter()
                .map(|option| {
                    let label = if option.label.is_empty() {
                        "(none)".to_string()
                    } else {
                        option.label.clone()
                    };
                    PromptOption::new(label, option.value.clone())
                })
                .collect(),
        ),
        Widget::Date => Prompt::input(field.name.as_str(), format!("{} (YYYY-MM-DD)", field.label)),
        Widget::Number | Widget::Text => Prompt::input(field.name.as_str(), field.label.as_str()),
    };

    if current.is_empty() {
        prompt
    } else {
        prompt.with_default(current)
    }
}

fn ask_move(wizard: &Wizard, ui: &mut dyn UserInterface) -> Result<Move> {
    let view = wizard.view();
    let mut options = Vec::new();
    if view.next_visible {
        options.push(PromptOption::new("Next", "next"));
    }
    if view.submit_visible {
        options.push(PromptOption::new(wizard.control().label(), "submit"));
    }
    if view.back_enabled {
        options.push(PromptOption::new("Back", "back"));
    }
    options.push(PromptOption::new("Cancel", "cancel"));

    let default = if view.submit_visible { "submit" } else { "next" };
    let prompt = Prompt::select(NAV_KEY, format!("Step {}", view.position()), options)
        .with_default(default);

    let answer = ui.prompt(&prompt)?.as_string();
    Ok(Move::parse(&answer).unwrap_or_else(|| {
        tracing::warn!("Unknown wizard move '{}', staying on this step", answer);
        ui.warning(&format!("Unknown choice '{}'", answer));
        Move::Stay
    }))
}

fn show_message(page: &Page, ui: &mut dyn UserInterface) {
    if let Some(message) = page.message() {
        ui.error(message);
    }
    for (field, message) in page.field_errors() {
        ui.error(&format!("{}: {}", field, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Choice, FieldDescriptor, MetadataDocument};
    use crate::ui::MockUI;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn wizard() -> Wizard {
        Wizard::from_metadata(&MetadataDocument {
            fields: vec![
                FieldDescriptor::select("project", vec![Choice::new("3", "Harbour Upgrade")]),
                FieldDescriptor::date("audit_date"),
                FieldDescriptor::text("audit_number"),
                FieldDescriptor::text("performed_by"),
                FieldDescriptor::text("report_number"),
            ],
            score_fields: vec![FieldDescriptor::number("overall_score_percentage")],
            notice_fields: vec![],
        })
    }

    fn answer_basic_info(ui: &mut MockUI) {
        ui.set_prompt_response("project", "3");
        ui.set_prompt_response("audit_date", "2026-03-01");
        ui.set_prompt_response("audit_number", "A-17");
        ui.set_prompt_response("performed_by", "N. Dlamini");
        ui.set_prompt_response("report_number", "R-0042");
    }

    #[test]
    fn walks_all_steps_and_submits() {
        let server = MockServer::start();
        let create = server.mock(|when, then| {
            when.method(POST).path("/reports/create/").json_body(json!({
                "project": "3",
                "audit_date": "2026-03-01",
                "audit_number": "A-17",
                "performed_by": "N. Dlamini",
                "report_number": "R-0042",
                "overall_score_percentage": 91
            }));
            then.status(200).json_body(json!({"success": true, "id": 8}));
        });
        let client = FormClient::new(&server.base_url(), Duration::from_secs(5)).unwrap();

        let mut ui = MockUI::new();
        answer_basic_info(&mut ui);
        ui.set_prompt_response("overall_score_percentage", "91");
        ui.queue_prompt_responses(NAV_KEY, vec!["next", "next", "submit"]);

        let mut page = Page::new("/reports/");
        let mut wizard = wizard();
        let outcome = run_wizard(&mut wizard, &client, &mut page, &mut ui).unwrap();

        create.assert();
        assert_eq!(outcome, WizardOutcome::Created { id: Some("8".into()) });
        assert_eq!(ui.headers(), &["Basic Info", "Scores", "Notices"]);
        assert_eq!(ui.progress(), &[(1, 3), (2, 3), (3, 3)]);
        assert!(ui.has_message("Nothing to fill in"));
        assert_eq!(page.location(), "/reports/8/");
    }

    #[test]
    fn blocked_next_in_non_interactive_run_is_abandoned() {
        let client = FormClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response(NAV_KEY, "next");

        let mut page = Page::new("/reports/");
        let outcome = run_wizard(&mut wizard(), &client, &mut page, &mut ui).unwrap();

        assert_eq!(outcome, WizardOutcome::Abandoned);
        assert!(ui.has_error("Please fill required fields: project, audit_date"));
    }

    #[test]
    fn interactive_run_retries_after_block_and_can_cancel() {
        let client = FormClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let mut ui = MockUI::new();
        ui.set_interactive(true);
        ui.queue_prompt_responses(NAV_KEY, vec!["next", "cancel"]);

        let mut page = Page::new("/reports/");
        let outcome = run_wizard(&mut wizard(), &client, &mut page, &mut ui).unwrap();

        assert_eq!(outcome, WizardOutcome::Cancelled);
        assert_eq!(ui.headers(), &["Basic Info", "Basic Info"]);
        assert_eq!(page.message(), None);
    }

    #[test]
    fn rejected_field_errors_are_shown_next_to_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/reports/create/");
            then.status(400).json_body(json!({
                "success": false,
                "errors": {"audit_number": ["Audit with this number already exists."]}
            }));
        });
        let client = FormClient::new(&server.base_url(), Duration::from_secs(5)).unwrap();

        let mut ui = MockUI::new();
        ui.set_interactive(true);
        answer_basic_info(&mut ui);
        ui.queue_prompt_responses(NAV_KEY, vec!["next", "next", "submit", "back", "cancel"]);

        let mut page = Page::new("/reports/");
        let outcome = run_wizard(&mut wizard(), &client, &mut page, &mut ui).unwrap();

        assert_eq!(outcome, WizardOutcome::Cancelled);
        assert!(ui.has_error("audit_number: Audit with this number already exists."));
    }

    #[test]
    fn unknown_move_stays_on_the_step() {
        let client = FormClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let mut ui = MockUI::new();
        ui.set_interactive(true);
        answer_basic_info(&mut ui);
        ui.queue_prompt_responses(NAV_KEY, vec!["next", "sideways", "cancel"]);

        let mut page = Page::new("/reports/");
        let mut wizard = wizard();
        let outcome = run_wizard(&mut wizard, &client, &mut page, &mut ui).unwrap();

        assert_eq!(outcome, WizardOutcome::Cancelled);
        assert_eq!(ui.headers(), &["Basic Info", "Scores", "Scores"]);
        assert!(ui.has_warning("Unknown choice 'sideways'"));
        assert_eq!(wizard.state().current_step(), 1);
    }

    #[test]
    fn unknown_move_in_non_interactive_run_is_abandoned() {
        let client = FormClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let mut ui = MockUI::new();
        answer_basic_info(&mut ui);
        ui.set_prompt_response(NAV_KEY, "sideways");

        let mut page = Page::new("/reports/");
        let mut wizard = wizard();
        let outcome = run_wizard(&mut wizard, &client, &mut page, &mut ui).unwrap();

        assert_eq!(outcome, WizardOutcome::Abandoned);
        assert_eq!(wizard.state().current_step(), 0);
    }

    #[test]
    fn prompt_failure_propagates() {
        let client = FormClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let mut ui = MockUI::new();
        ui.fail_prompt("project");

        let mut page = Page::new("/reports/");
        assert!(run_wizard(&mut wizard(), &client, &mut page, &mut ui).is_err());
    }

    #[test]
    fn select_prompt_names_blank_option() {
        let wizard = wizard();
        let prompt = field_prompt(&wizard.steps()[0].fields[0], String::new());
        let crate::ui::PromptType::Select { options } = prompt.prompt_type else {
            panic!("expected select");
        };
        assert_eq!(options[0].label, "(none)");
        assert_eq!(options[0].value, "");
        assert_eq!(options[1].label, "Harbour Upgrade");
    }
}
