//! The page a console session is looking at.
//!
//! A [`Page`] holds what the workspace's web pages show besides their
//! content: the shared message slot, the per-field error slots, the shown
//! toggle targets (modals and panels) and the current location. Handlers
//! receive it explicitly and the UI renders it after each trigger.

use std::collections::{BTreeMap, BTreeSet};

use crate::http::{FieldErrors, SubmitFailure};

/// Error key for messages that belong to the whole form.
pub const ALL_KEY: &str = "__all__";

/// Shown when a request failed without a usable message.
pub const GENERIC_RETRY: &str = "Request failed. Please try again.";

/// Shown when a request never reached the server.
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";

/// Shown when a success status carried a body of the wrong shape.
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from server.";

/// A location change requested by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Go to another location.
    Redirect(String),
    /// Reload the current location.
    Reload,
}

/// Mutable state of the current page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    location: String,
    message: Option<String>,
    field_errors: BTreeMap<String, String>,
    shown: BTreeSet<String>,
    navigation: Option<Navigation>,
}

impl Page {
    /// A page at the given location.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Default::default()
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Contents of the shared message slot.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Contents of one field's error slot.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    pub fn field_errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.field_errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether the shared slot or any field slot holds a message.
    pub fn has_errors(&self) -> bool {
        self.message.is_some() || !self.field_errors.is_empty()
    }

    /// Empty the shared slot and every field slot.
    pub fn clear_errors(&mut self) {
        self.message = None;
        self.field_errors.clear();
    }

    /// Flip whether an element is shown. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.shown.remove(id) {
            false
        } else {
            self.shown.insert(id.to_string());
            true
        }
    }

    pub fn show(&mut self, id: &str) {
        self.shown.insert(id.to_string());
    }

    pub fn hide(&mut self, id: &str) {
        self.shown.remove(id);
    }

    pub fn is_shown(&self, id: &str) -> bool {
        self.shown.contains(id)
    }

    /// Move to another location.
    pub fn navigate(&mut self, location: impl Into<String>) {
        let location = location.into();
        tracing::debug!("Navigating to {}", location);
        self.location = location.clone();
        self.shown.clear();
        self.clear_errors();
        self.navigation = Some(Navigation::Redirect(location));
    }

    /// Reload the current location; transient page state is lost.
    pub fn reload(&mut self) {
        tracing::debug!("Reloading {}", self.location);
        self.shown.clear();
        self.clear_errors();
        self.navigation = Some(Navigation::Reload);
    }

    /// Take the last navigation request, if any.
    pub fn take_navigation(&mut self) -> Option<Navigation> {
        self.navigation.take()
    }

    /// Route server messages to their slots.
    ///
    /// `__all__` goes to the shared slot. Keys in `slots` go to their
    /// field slot. Keys with no slot on this form are appended to the
    /// shared slot so no message is lost.
    pub fn route_errors(&mut self, errors: &FieldErrors, slots: &[&str]) {
        let mut shared = Vec::new();
        if let Some(all) = errors.non_field() {
            shared.push(all.to_string());
        }

        for (key, message) in errors.iter() {
            if key == ALL_KEY {
                continue;
            }
            if slots.contains(&key) {
                self.field_errors.insert(key.to_string(), message.to_string());
            } else {
                shared.push(format!("{}: {}", key, message));
            }
        }

        if !shared.is_empty() {
            self.message = Some(shared.join(" "));
        }
    }

    /// Show a failed request on the page.
    pub fn show_failure(&mut self, failure: &SubmitFailure, slots: &[&str]) {
        match failure {
            SubmitFailure::Rejected(errors) => self.route_errors(errors, slots),
            SubmitFailure::Server {
                detail: Some(detail),
                ..
            } => self.set_message(detail.clone()),
            SubmitFailure::Server { detail: None, .. } => self.set_message(GENERIC_RETRY),
            SubmitFailure::Transport(_) => self.set_message(NETWORK_ERROR),
            SubmitFailure::UnexpectedResponse { .. } => self.set_message(UNEXPECTED_RESPONSE),
            SubmitFailure::InFlight => {
                tracing::debug!("Ignoring trigger while a submission is in flight");
            }
        }
    }
}
