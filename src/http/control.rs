//! The control that triggers a submission.
//!
//! While a request is in flight its control is disabled and shows a busy
//! label. [`BusyGuard`] restores both on drop, so every exit path of a
//! submission (success, rejection, transport failure, unwinding) puts the
//! control back exactly as it was.

/// A submit button: a label and an enabled flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    label: String,
    busy_label: String,
    enabled: bool,
}

impl SubmitControl {
    /// Create an enabled control.
    pub fn new(label: impl Into<String>, busy_label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            busy_label: busy_label.into(),
            enabled: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn busy_label(&self) -> &str {
        &self.busy_label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disable the control and show its busy label.
    ///
    /// Returns `None` when the control is already disabled.
    pub fn engage(&mut self) -> Option<BusyGuard<'_>> {
        if !self.enabled {
            return None;
        }

        let saved_label = std::mem::replace(&mut self.label, self.busy_label.clone());
        self.enabled = false;
        Some(BusyGuard {
            control: self,
            saved_label,
        })
    }
}

/// Restores a [`SubmitControl`] when dropped.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    control: &'a mut SubmitControl,
    saved_label: String,
}

impl BusyGuard<'_> {
    /// The control in its busy state.
    pub fn control(&self) -> &SubmitControl {
        self.control
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.control.label = std::mem::take(&mut self.saved_label);
        self.control.enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn engage_swaps_label_and_disables() {
        let mut control = SubmitControl::new("Save", "Saving...");
        {
            let guard = control.engage().unwrap();
            assert_eq!(guard.control().label(), "Saving...");
            assert!(!guard.control().is_enabled());
        }
        assert_eq!(control.label(), "Save");
        assert!(control.is_enabled());
    }

    #[test]
    fn engaged_control_refuses_second_engage() {
        let mut control = SubmitControl::new("Save", "Saving...");
        control.enabled = false;
        assert!(control.engage().is_none());
    }

    #[test]
    fn restores_after_unwinding() {
        let mut control = SubmitControl::new("Create", "Creating...");
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _guard = control.engage().unwrap();
            panic!("request blew up");
        }));
        assert!(result.is_err());
        assert_eq!(control.label(), "Create");
        assert!(control.is_enabled());
    }

    #[test]
    fn can_engage_again_after_completion() {
        let mut control = SubmitControl::new("Send", "Sending...");
        drop(control.engage());
        assert!(control.engage().is_some());
    }
}
