//! Configuration schema.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};

/// Resolved console configuration.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Root URL of the audit workspace.
    pub base_url: String,

    /// Username offered as the default at the login prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Quiet period after which the session logs out.
    pub idle_timeout_secs: u64,

    /// Per-request timeout.
    pub request_timeout_secs: u64,

    /// Login form action.
    pub login_path: String,

    /// Logout endpoint.
    pub logout_path: String,

    /// Cookie holding the anti-forgery token.
    pub csrf_cookie: String,

    /// Header the anti-forgery token is sent in.
    pub csrf_header: String,

    /// Fixed anti-forgery token; overrides the cookie when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            username: None,
            idle_timeout_secs: 600,
            request_timeout_secs: 30,
            login_path: "/login-ajax/".to_string(),
            logout_path: "/logout-ajax/".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            csrf_token: None,
        }
    }
}

impl ConsoleConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check values that deserialize fine but cannot work.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ConsoleError::InvalidUrl {
            url: self.base_url.clone(),
            message: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConsoleError::InvalidUrl {
                url: self.base_url.clone(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if self.idle_timeout_secs == 0 {
            return Err(ConsoleError::ConfigValidationError {
                message: "idle_timeout_secs must be greater than zero".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConsoleError::ConfigValidationError {
                message: "request_timeout_secs must be greater than zero".to_string(),
            });
        }

        for (key, path) in [("login_path", &self.login_path), ("logout_path", &self.logout_path)] {
            if !path.starts_with('/') {
                return Err(ConsoleError::ConfigValidationError {
                    message: format!("{} must start with '/': {}", key, path),
                });
            }
        }

        Ok(())
    }
}
