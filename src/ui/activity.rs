//! A [`UserInterface`] that reports typing to the inactivity monitor.
//!
//! Every prompt counts as key-press activity, whether it is the shell's
//! trigger prompt or a field inside a handler.

use crate::error::Result;
use crate::inactivity::{ActivityRecorder, ActivitySignal};

use super::{OutputMode, Prompt, PromptResult, SpinnerHandle, UserInterface};

/// Wraps another UI and records activity around each prompt.
pub struct ActivityUI<'a> {
    inner: &'a mut dyn UserInterface,
    recorder: ActivityRecorder,
}

impl<'a> ActivityUI<'a> {
    pub fn new(inner: &'a mut dyn UserInterface, recorder: ActivityRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl UserInterface for ActivityUI<'_> {
    fn output_mode(&self) -> OutputMode {
        self.inner.output_mode()
    }

    fn message(&mut self, msg: &str) {
        self.inner.message(msg);
    }

    fn success(&mut self, msg: &str) {
        self.inner.success(msg);
    }

    fn warning(&mut self, msg: &str) {
        self.inner.warning(msg);
    }

    fn error(&mut self, msg: &str) {
        self.inner.error(msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.recorder.record(ActivitySignal::KeyPress);
        let answer = self.inner.prompt(prompt);
        self.recorder.record(ActivitySignal::KeyPress);
        answer
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.inner.start_spinner(message)
    }

    fn show_header(&mut self, title: &str) {
        self.inner.show_header(title);
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        self.inner.show_progress(current, total);
    }

    fn show_detail(&mut self, key: &str, value: &str) {
        self.inner.show_detail(key, value);
    }

    fn is_interactive(&self) -> bool {
        self.inner.is_interactive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionDispatcher, Session, Trigger};
    use crate::config::ConsoleConfig;
    use crate::inactivity::InactivityMonitor;
    use crate::ui::MockUI;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn delegates_to_the_wrapped_ui() {
        let monitor = InactivityMonitor::arm(Duration::from_secs(60), || {});
        let mut mock = MockUI::new();
        mock.set_prompt_response("username", "auditor");

        let mut ui = ActivityUI::new(&mut mock, monitor.recorder());
        let answer = ui.prompt(&Prompt::input("username", "Username")).unwrap();
        ui.success("Logged in");
        monitor.disarm();

        assert_eq!(answer.as_string(), "auditor");
        assert!(mock.has_success("Logged in"));
    }

    #[test]
    fn typing_into_the_wizard_keeps_the_session_alive() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/reports/create/");
            then.status(200).json_body(json!({
                "fields": [
                    {"name": "project", "type": "text"},
                    {"name": "audit_date", "type": "date"},
                    {"name": "audit_number", "type": "text"},
                    {"name": "performed_by", "type": "text"},
                    {"name": "report_number", "type": "text"}
                ],
                "score_fields": [{"name": "overall_score_percentage", "type": "number"}]
            }));
        });

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let monitor = InactivityMonitor::arm(Duration::from_millis(400), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let config = ConsoleConfig {
            base_url: server.base_url(),
            ..Default::default()
        };
        let mut dispatcher = ActionDispatcher::new(Session::new(config).unwrap());
        let mut mock = MockUI::new();
        mock.set_interactive(true);
        mock.set_prompt_delay(Duration::from_millis(120));
        for field in ["project", "audit_date", "audit_number", "performed_by", "report_number"] {
            mock.set_prompt_response(field, "x");
        }
        mock.queue_prompt_responses("wizard_nav", vec!["next", "cancel"]);

        // Eight prompts at 120ms each: well past the timeout in total.
        let mut ui = ActivityUI::new(&mut mock, monitor.recorder());
        dispatcher
            .dispatch(&Trigger::action("report-create", None), &mut ui)
            .unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(mock.prompts_shown().len(), 8);

        thread::sleep(Duration::from_millis(800));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
