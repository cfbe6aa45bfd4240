//! Classification of server replies.
//!
//! Every JSON endpoint of the audit workspace answers in one of a few
//! shapes. [`classify`] turns a status code and body into either a
//! [`Reply`] or a [`SubmitFailure`], so callers match on categories
//! instead of probing ad hoc fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::page::ALL_KEY;

/// Server-side validation messages keyed by field name or `__all__`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message for a key, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The form-wide message, if any.
    pub fn non_field(&self) -> Option<&str> {
        self.get(ALL_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .map(|(key, value)| (key, message_text(value)))
                .collect(),
        ))
    }
}

/// Flatten one error entry. Form validation sends lists of messages.
fn message_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .map(message_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Value::Object(mut map) => match map.remove("message") {
            Some(message) => message_text(message),
            None => Value::Object(map).to_string(),
        },
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A successful reply (`success: true`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Where the server wants the user to go next.
    pub redirect: Option<String>,
    /// Identifier of a created object.
    pub id: Option<String>,
}

impl Reply {
    /// Redirect target, defaulting to the site root.
    pub fn redirect_or_root(&self) -> &str {
        self.redirect.as_deref().unwrap_or("/")
    }
}

/// Why a request did not produce a usable reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitFailure {
    /// The server rejected the input with field-level messages.
    #[error("Rejected: {0}")]
    Rejected(FieldErrors),

    /// The server failed the request without field messages.
    #[error("HTTP {status}{}", .detail.as_deref().map(|d| format!(": {}", d)).unwrap_or_default())]
    Server { status: u16, detail: Option<String> },

    /// The request never got an HTTP answer.
    #[error("Network error: {0}")]
    Transport(String),

    /// A success status with a body of the wrong shape.
    #[error("Unexpected response (HTTP {status})")]
    UnexpectedResponse { status: u16 },

    /// The triggering control is still busy with an earlier submission.
    #[error("A submission is already in progress")]
    InFlight,
}

#[derive(Debug, Default, Deserialize)]
struct ReplyBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    redirect: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    id: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
    #[serde(default)]
    detail: Option<String>,
}

fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Failure for a non-success status.
pub(crate) fn failure_for_status(status: u16, body: &str) -> SubmitFailure {
    match serde_json::from_str::<ReplyBody>(body) {
        Ok(ReplyBody {
            errors: Some(errors),
            ..
        }) if !errors.is_empty() => SubmitFailure::Rejected(errors),
        Ok(ReplyBody {
            detail: Some(detail),
            ..
        }) => SubmitFailure::Server {
            status,
            detail: Some(detail),
        },
        _ => SubmitFailure::Server {
            status,
            detail: None,
        },
    }
}

/// Classify a reply to a form submission.
pub fn classify(status: u16, body: &str) -> Result<Reply, SubmitFailure> {
    if !(200..300).contains(&status) {
        return Err(failure_for_status(status, body));
    }

    match serde_json::from_str::<ReplyBody>(body) {
        Ok(parsed) if parsed.success == Some(true) => Ok(Reply {
            redirect: parsed.redirect,
            id: parsed.id,
        }),
        Ok(ReplyBody {
            errors: Some(errors),
            ..
        }) if !errors.is_empty() => Err(SubmitFailure::Rejected(errors)),
        _ => Err(SubmitFailure::UnexpectedResponse { status }),
    }
}
