//! Trigger dispatch.

use crate::error::Result;
use crate::ui::{render_page, UserInterface};

use super::action::{Action, Trigger};
use super::handlers;
use super::session::Session;

/// What happened to a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler ran.
    Handled(Action),
    /// The trigger named nothing runnable and was dropped.
    Ignored,
}

/// Routes triggers to their handlers for one session.
pub struct ActionDispatcher {
    session: Session,
}

impl ActionDispatcher {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Give the session back.
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Run the handler a trigger names, then show the page.
    ///
    /// Messages left by the previous trigger are cleared first, so each
    /// render shows only what this handler reported.
    ///
    /// Unknown actions or forms and missing targets are logged and ignored.
    pub fn dispatch(&mut self, trigger: &Trigger, ui: &mut dyn UserInterface) -> Result<Dispatch> {
        let action = match trigger.resolve() {
            Ok(Some(action)) => action,
            Ok(None) => {
                tracing::warn!("Trigger names no action or form: {:?}", trigger);
                return Ok(Dispatch::Ignored);
            }
            Err(unknown) => {
                tracing::warn!("Ignoring trigger: {}", unknown);
                return Ok(Dispatch::Ignored);
            }
        };

        let target = trigger.target.as_deref();
        if action.needs_target() && target.is_none() {
            tracing::warn!("Ignoring '{}' without a target", action);
            return Ok(Dispatch::Ignored);
        }

        tracing::debug!("Dispatching {} (target {:?})", action, target);
        let session = &mut self.session;
        session.page.clear_errors();
        match (action, target) {
            (Action::Toggle, Some(id)) => handlers::toggle(session, ui, id),
            (Action::LoginSubmit, _) => handlers::login(session, ui)?,
            (Action::Logout, _) => handlers::logout_action(session, ui),
            (Action::ClientView, Some(id)) => handlers::client_view(session, ui, id),
            (Action::ClientSave, target) => handlers::client_save(session, ui, target)?,
            (Action::ReportCreate, _) => handlers::report_create(session, ui)?,
            (Action::ReportShare, Some(id)) => handlers::report_share(session, ui, id),
            (Action::ShareSend, _) => handlers::share_send(session, ui)?,
            (Action::Toggle | Action::ClientView | Action::ReportShare, None) => {
                return Ok(Dispatch::Ignored)
            }
        }

        render_page(&mut self.session.page, ui);
        Ok(Dispatch::Handled(action))
    }
}
