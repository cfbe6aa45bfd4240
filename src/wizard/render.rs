//! Field rendering.
//!
//! Turns one [`FieldDescriptor`] into a [`RenderedField`]: the widget the
//! user fills in plus the error slot that server messages for the field are
//! routed to. Nothing is validated here.

use crate::metadata::{FieldDescriptor, FieldType};

/// One option of a select widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    /// The leading option meaning "nothing chosen".
    pub fn blank() -> Self {
        Self {
            value: String::new(),
            label: String::new(),
        }
    }
}

/// Input widget of a rendered field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Single select; the first option is always blank.
    Select { options: Vec<SelectOption> },
    /// Date input.
    Date,
    /// Number input; submitted as a JSON number or null.
    Number,
    /// Text input.
    Text,
}

impl Widget {
    /// Whether values of this widget are coerced to numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number)
    }
}

/// A field ready to be shown, with its error slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    /// Payload key.
    pub name: String,
    /// Human label.
    pub label: String,
    /// Widget to fill in.
    pub widget: Widget,
}

impl RenderedField {
    /// Key of the error slot next to this field.
    pub fn error_slot(&self) -> &str {
        &self.name
    }
}

/// Render a field descriptor.
///
/// Choices win over the type hint; then `date`, then `number`; anything
/// else is a text input.
pub fn render_field(descriptor: &FieldDescriptor) -> RenderedField {
    let widget = if !descriptor.choices.is_empty() {
        let options = std::iter::once(SelectOption::blank())
            .chain(descriptor.choices.iter().map(|c| SelectOption {
                value: c.value.clone(),
                label: c.display_label().to_string(),
            }))
            .collect();
        Widget::Select { options }
    } else {
        match descriptor.field_type {
            Some(FieldType::Date) => Widget::Date,
            Some(FieldType::Number) => Widget::Number,
            _ => Widget::Text,
        }
    };

    RenderedField {
        name: descriptor.name.clone(),
        label: label_for(&descriptor.name),
        widget,
    }
}

/// Label derived from a field name: underscores become spaces.
pub fn label_for(name: &str) -> String {
    name.replace('_', " ")
}
