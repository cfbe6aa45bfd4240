//! State shared by the handlers of one console session.

use crate::config::ConsoleConfig;
use crate::error::Result;
use crate::http::{FormClient, SubmitControl};
use crate::metadata::ClientRecord;
use crate::page::Page;

/// Element id of the client detail modal.
pub const CLIENT_MODAL: &str = "client-modal";
/// Element id of the share modal.
pub const SHARE_MODAL: &str = "share-modal";
/// Element id of the report wizard modal.
pub const REPORT_MODAL: &str = "report-modal";

/// Submit controls of the intercepted forms.
#[derive(Debug, Clone)]
pub struct Controls {
    pub login: SubmitControl,
    pub logout: SubmitControl,
    pub client_save: SubmitControl,
    pub share_send: SubmitControl,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            login: SubmitControl::new("Login", "Logging in..."),
            logout: SubmitControl::new("Logout", "Logging out..."),
            client_save: SubmitControl::new("Save", "Saving..."),
            share_send: SubmitControl::new("Send", "Sending..."),
        }
    }
}

/// One console session against one workspace.
pub struct Session {
    pub(crate) config: ConsoleConfig,
    pub(crate) client: FormClient,
    pub(crate) page: Page,
    pub(crate) controls: Controls,
    pub(crate) open_client: Option<ClientRecord>,
    pub(crate) share_target: Option<String>,
}

impl Session {
    /// Start a session on the site root.
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        let client = FormClient::from_config(&config)?;
        Ok(Self::with_client(config, client))
    }

    /// Start a session with an existing client.
    pub fn with_client(config: ConsoleConfig, client: FormClient) -> Self {
        Self {
            config,
            client,
            page: Page::new("/"),
            controls: Controls::default(),
            open_client: None,
            share_target: None,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn client(&self) -> &FormClient {
        &self.client
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Record shown in the client modal.
    pub fn open_client(&self) -> Option<&ClientRecord> {
        self.open_client.as_ref()
    }

    /// Report picked for sharing.
    pub fn share_target(&self) -> Option<&str> {
        self.share_target.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_at_root() {
        let session = Session::new(ConsoleConfig::default()).unwrap();
        assert_eq!(session.page().location(), "/");
        assert!(session.open_client().is_none());
        assert!(session.share_target().is_none());
        assert!(session.controls.login.is_enabled());
    }

    #[test]
    fn bad_base_url_fails() {
        let config = ConsoleConfig {
            base_url: "::".into(),
            ..Default::default()
        };
        assert!(Session::new(config).is_err());
    }
}
