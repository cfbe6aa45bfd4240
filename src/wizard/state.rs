//! Wizard state and payload collection.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use super::render::Widget;
use super::steps::StepDefinition;

/// Current value of one wizard input.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Number),
    Null,
}

impl FieldValue {
    /// Coerce raw user input for the given widget.
    ///
    /// Number widgets parse the trimmed input as an integer, then as a
    /// float; empty or unparseable input becomes `Null`. Every other widget
    /// keeps the input as typed.
    pub fn from_input(widget: &Widget, raw: &str) -> Self {
        if !widget.is_numeric() {
            return Self::Text(raw.to_string());
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Null;
        }
        if let Ok(n) = trimmed.parse::<i64>() {
            return Self::Number(n.into());
        }
        match trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
            Some(n) => Self::Number(n),
            None => {
                tracing::debug!("Non-numeric input '{}' submitted as null", trimmed);
                Self::Null
            }
        }
    }

    /// Value a widget holds before the user touches it.
    pub fn initial(widget: &Widget) -> Self {
        if widget.is_numeric() {
            Self::Null
        } else {
            Self::Text(String::new())
        }
    }

    /// Whether the value counts as "not filled in".
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
            Self::Null => true,
        }
    }

    /// Text form, used to pre-fill the input when a step is shown again.
    pub fn as_input(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Null => String::new(),
        }
    }

    /// JSON form sent to the server.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Null => Value::Null,
        }
    }
}

/// State of one open wizard.
///
/// Created when the wizard opens and dropped on dismissal or successful
/// submission. `current_step` is always a valid step index.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    current_step: usize,
    step_count: usize,
    values: BTreeMap<String, FieldValue>,
}

impl WizardState {
    /// Fresh state positioned on the first step.
    pub fn new(step_count: usize) -> Self {
        Self {
            current_step: 0,
            step_count: step_count.max(1),
            values: BTreeMap::new(),
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn last_step(&self) -> usize {
        self.step_count - 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.last_step()
    }

    /// Move one step forward, clamped to the last step.
    pub(crate) fn advance(&mut self) {
        self.current_step = (self.current_step + 1).min(self.last_step());
    }

    /// Move one step back, clamped to the first step.
    pub(crate) fn retreat(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    pub(crate) fn jump_to(&mut self, step: usize) {
        self.current_step = step.min(self.last_step());
    }

    /// Record a value for a field.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    /// Value of a field, if it was ever set.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    /// Whether a field is missing or blank.
    pub fn is_blank(&self, name: &str) -> bool {
        self.values.get(name).map_or(true, FieldValue::is_blank)
    }

    /// Collect the submission payload: every rendered field of every step.
    ///
    /// Fields never filled in are sent with their widget's initial value.
    pub fn payload(&self, steps: &[StepDefinition]) -> Map<String, Value> {
        steps
            .iter()
            .flat_map(|step| step.fields.iter())
            .map(|field| {
                let value = self
                    .values
                    .get(&field.name)
                    .cloned()
                    .unwrap_or_else(|| FieldValue::initial(&field.widget));
                (field.name.clone(), value.to_json())
            })
            .collect()
    }
}
