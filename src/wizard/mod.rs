//! The multi-step report creation wizard.
//!
//! - [`render`] turns field descriptors into widgets
//! - [`steps`] groups them into Basic Info, Scores and Notices
//! - [`state`] holds the entered values and builds the payload
//! - [`controller`] gates navigation and submits
//! - [`view`] projects the state onto what is shown
//! - [`driver`] runs a wizard through a user interface

pub mod controller;
pub mod driver;
pub mod render;
pub mod state;
pub mod steps;
pub mod view;

pub use controller::{
    report_location, SubmitOutcome, ValidationFailure, Wizard, CREATE_PATH, REQUIRED_FIELDS,
};
pub use driver::{run_wizard, WizardOutcome};
pub use render::{label_for, render_field, RenderedField, SelectOption, Widget};
pub use state::{FieldValue, WizardState};
pub use steps::{assemble_steps, StepDefinition, STEP_COUNT};
pub use view::{StepView, WizardView};
