//! Records exchanged with the audit workspace.
//!
//! The report wizard is driven entirely by server-declared field metadata:
//! `GET /reports/create/` answers with a [`MetadataDocument`] listing the
//! Basic Info, Scores and Notices fields. The remaining types here are the
//! client record and the small request bodies the action handlers send.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Input type hint of a field descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text.
    Text,
    /// Numeric input.
    Number,
    /// Calendar date (`YYYY-MM-DD`).
    Date,
    /// Any hint this client does not know; rendered as text.
    #[serde(other)]
    Other,
}

/// One selectable value of a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choice {
    /// Submitted value. Numeric primary keys are accepted and stringified.
    #[serde(deserialize_with = "scalar_as_string")]
    pub value: String,
    /// Display label; falls back to the value when missing or empty.
    #[serde(default)]
    pub label: Option<String>,
}

impl Choice {
    /// Create a choice with an explicit label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: Some(label.into()),
        }
    }

    /// Label shown to the user.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.value,
        }
    }
}

/// Server-declared description of a single wizard input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, unique within its step. Also the payload key.
    pub name: String,
    /// Type hint; omitted for pure choice fields.
    #[serde(rename = "type", default)]
    pub field_type: Option<FieldType>,
    /// Choices; when non-empty the field is a select regardless of type.
    #[serde(default, deserialize_with = "nullable_list")]
    pub choices: Vec<Choice>,
}

impl FieldDescriptor {
    /// A plain text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::typed(name, FieldType::Text)
    }

    /// A number field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::typed(name, FieldType::Number)
    }

    /// A date field.
    pub fn date(name: impl Into<String>) -> Self {
        Self::typed(name, FieldType::Date)
    }

    /// A choice field without a type hint.
    pub fn select(name: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            name: name.into(),
            field_type: None,
            choices,
        }
    }

    fn typed(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type: Some(field_type),
            choices: Vec::new(),
        }
    }
}

/// Metadata answered by `GET /reports/create/`.
///
/// Missing or `null` lists are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MetadataDocument {
    /// Basic Info fields.
    #[serde(default, deserialize_with = "nullable_list")]
    pub fields: Vec<FieldDescriptor>,
    /// Scores fields.
    #[serde(default, deserialize_with = "nullable_list")]
    pub score_fields: Vec<FieldDescriptor>,
    /// Notices fields.
    #[serde(default, deserialize_with = "nullable_list")]
    pub notice_fields: Vec<FieldDescriptor>,
}

/// A client as answered by `GET /clients/{id}/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientRecord {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub contact_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub contact_email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub contact_phone: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub address: String,
}

impl ClientRecord {
    /// The editable contact part of this record.
    pub fn contact(&self) -> ClientUpdate {
        ClientUpdate {
            contact_name: self.contact_name.clone(),
            contact_email: self.contact_email.clone(),
            contact_phone: self.contact_phone.clone(),
            address: self.address.clone(),
        }
    }
}

/// Body of `POST /clients/{id}/update/`. The server only accepts these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientUpdate {
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
}

impl ClientUpdate {
    /// Field names in form order.
    pub const FIELDS: [&'static str; 4] =
        ["contact_name", "contact_email", "contact_phone", "address"];

    /// Current value of a field by name.
    pub fn get(&self, field: &str) -> Option<&str> {
        match field {
            "contact_name" => Some(&self.contact_name),
            "contact_email" => Some(&self.contact_email),
            "contact_phone" => Some(&self.contact_phone),
            "address" => Some(&self.address),
            _ => None,
        }
    }

    /// Set a field by name. Unknown names are ignored.
    pub fn set(&mut self, field: &str, value: String) {
        match field {
            "contact_name" => self.contact_name = value,
            "contact_email" => self.contact_email = value,
            "contact_phone" => self.contact_phone = value,
            "address" => self.address = value,
            _ => {}
        }
    }
}

/// Body of `POST /reports/{id}/share/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShareRequest {
    pub to_email: String,
    pub message: String,
}

/// Body of the login form.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Accept a JSON string, number or boolean and keep its text form.
pub(crate) fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!("expected a scalar, got {}", other))),
    }
}

fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
