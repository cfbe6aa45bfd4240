//! Wizard controller.
//!
//! Owns the open wizard: its steps, its state and its submit control.
//! Transitions are gated by [`Wizard::validate_current_step`]; submission
//! goes through [`FormClient`] and its outcome is applied to the [`Page`].

use thiserror::Error;

use crate::http::{FormClient, SubmitControl, SubmitFailure};
use crate::metadata::MetadataDocument;
use crate::page::Page;

use super::render::RenderedField;
use super::state::{FieldValue, WizardState};
use super::steps::{assemble_steps, StepDefinition, BASIC_INFO};
use super::view::{StepView, WizardView};

/// Endpoint serving the metadata document and accepting new reports.
pub const CREATE_PATH: &str = "/reports/create/";

/// Basic Info fields that must be filled in, in message order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "project",
    "audit_date",
    "audit_number",
    "performed_by",
    "report_number",
];

/// Location of a report's detail page.
pub fn report_location(id: &str) -> String {
    format!("/reports/{}/", id)
}

/// Required fields left blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill required fields: {}", .missing.join(", "))]
pub struct ValidationFailure {
    pub missing: Vec<&'static str>,
}

/// Result of [`Wizard::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The report was created and the page moved on.
    Created { id: Option<String> },
    /// Required fields are blank; nothing was sent.
    Invalid(ValidationFailure),
    /// The server or the network failed the submission; the wizard stays open.
    Failed(SubmitFailure),
}

/// An open report wizard.
#[derive(Debug, Clone)]
pub struct Wizard {
    steps: Vec<StepDefinition>,
    state: WizardState,
    control: SubmitControl,
}

impl Wizard {
    /// Build a wizard from a metadata document, positioned on the first step.
    pub fn from_metadata(doc: &MetadataDocument) -> Self {
        let steps = assemble_steps(doc);
        let state = WizardState::new(steps.len());
        Self {
            steps,
            state,
            control: SubmitControl::new("Create Report", "Creating..."),
        }
    }

    /// Fetch the metadata document and open the wizard.
    ///
    /// On failure the page shows why and `None` is returned.
    pub fn open(client: &FormClient, page: &mut Page) -> Option<Self> {
        match client.get_json::<MetadataDocument>(CREATE_PATH) {
            Ok(doc) => {
                tracing::debug!(
                    "Opened report wizard ({} basic, {} score, {} notice fields)",
                    doc.fields.len(),
                    doc.score_fields.len(),
                    doc.notice_fields.len()
                );
                Some(Self::from_metadata(&doc))
            }
            Err(failure) => {
                tracing::warn!("Could not load report metadata: {}", failure);
                page.show_failure(&failure, &[]);
                None
            }
        }
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    /// The step currently shown.
    pub fn current(&self) -> &StepDefinition {
        &self.steps[self.state.current_step()]
    }

    /// Find a rendered field on any step.
    pub fn field(&self, name: &str) -> Option<&RenderedField> {
        self.steps
            .iter()
            .flat_map(|step| step.fields.iter())
            .find(|field| field.name == name)
    }

    /// Record raw input for a field, coerced for its widget.
    ///
    /// Input for a field that was not rendered is kept as text; it is never
    /// sent because the payload only covers rendered fields.
    pub fn set_input(&mut self, name: &str, raw: &str) {
        let value = match self.field(name) {
            Some(field) => FieldValue::from_input(&field.widget, raw),
            None => FieldValue::Text(raw.to_string()),
        };
        self.state.set(name, value);
    }

    /// Check the required fields of Basic Info, whatever step is shown.
    fn check_required(&self) -> Result<(), ValidationFailure> {
        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|name| self.state.is_blank(name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { missing })
        }
    }

    /// Validate the step currently shown.
    ///
    /// Only Basic Info has requirements; the other steps always pass.
    pub fn validate_current_step(&self) -> Result<(), ValidationFailure> {
        if self.state.current_step() == BASIC_INFO {
            self.check_required()
        } else {
            Ok(())
        }
    }

    /// Advance one step if the current step validates.
    ///
    /// A failure is shown in the shared message slot; fields are not marked.
    pub fn next(&mut self, page: &mut Page) -> bool {
        if let Err(failure) = self.validate_current_step() {
            tracing::debug!("Step {} blocked: {}", self.state.current_step(), failure);
            page.set_message(failure.to_string());
            return false;
        }

        page.clear_message();
        let from = self.state.current_step();
        self.state.advance();
        tracing::debug!("Wizard step {} -> {}", from, self.state.current_step());
        from != self.state.current_step()
    }

    /// Go back one step. Never validates.
    pub fn back(&mut self) {
        self.state.retreat();
    }

    /// Validate, collect and send the report.
    ///
    /// Blank required fields return the user to Basic Info with the missing
    /// names in the shared slot. A rejection routes each message to its
    /// field slot. Success navigates to the new report, or reloads the
    /// current location when the server sent no id.
    pub fn submit(&mut self, client: &FormClient, page: &mut Page) -> SubmitOutcome {
        if let Err(failure) = self.check_required() {
            page.set_message(failure.to_string());
            self.state.jump_to(BASIC_INFO);
            return SubmitOutcome::Invalid(failure);
        }

        page.clear_errors();
        let payload = self.state.payload(&self.steps);
        tracing::debug!("Submitting report with {} fields", payload.len());

        match client.submit(&mut self.control, CREATE_PATH, &payload) {
            Ok(reply) => {
                match &reply.id {
                    Some(id) => page.navigate(report_location(id)),
                    None => page.reload(),
                }
                SubmitOutcome::Created { id: reply.id }
            }
            Err(failure) => {
                let slots = self.error_slots();
                page.show_failure(&failure, &slots);
                SubmitOutcome::Failed(failure)
            }
        }
    }

    fn error_slots(&self) -> Vec<&str> {
        self.steps
            .iter()
            .flat_map(|step| step.fields.iter())
            .map(RenderedField::error_slot)
            .collect()
    }

    /// Project the state onto what the user sees.
    pub fn view(&self) -> WizardView {
        let current = self.state.current_step();
        WizardView {
            steps: self
                .steps
                .iter()
                .enumerate()
                .map(|(index, step)| StepView {
                    id: step.id,
                    title: step.title,
                    visible: index == current,
                })
                .collect(),
            back_enabled: current > 0,
            next_visible: !self.state.is_last_step(),
            submit_visible: self.state.is_last_step(),
        }
    }
}
