//! Form submission client.
//!
//! One [`FormClient`] lives for a console session. It keeps the session
//! cookie jar, finds the anti-forgery token in it and sends JSON forms the
//! way the workspace's own pages do.

use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{ACCEPT, REFERER};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};

use super::control::SubmitControl;
use super::reply::{classify, failure_for_status, Reply, SubmitFailure};

/// Where the anti-forgery token comes from and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfSettings {
    /// Cookie holding the token.
    pub cookie: String,
    /// Request header carrying the token.
    pub header: String,
    /// Fixed token; wins over the cookie.
    pub fixed: Option<String>,
}

impl Default for CsrfSettings {
    fn default() -> Self {
        Self {
            cookie: "csrftoken".to_string(),
            header: "X-CSRFToken".to_string(),
            fixed: None,
        }
    }
}

/// HTTP client bound to one audit workspace.
#[derive(Clone)]
pub struct FormClient {
    client: Client,
    jar: Arc<Jar>,
    base: Url,
    csrf: CsrfSettings,
    timeout: Duration,
}

impl FormClient {
    /// Create a client with default anti-forgery settings.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Self::with_csrf(base_url, timeout, CsrfSettings::default())
    }

    /// Create a client from the resolved configuration.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self> {
        Self::with_csrf(
            &config.base_url,
            config.request_timeout(),
            CsrfSettings {
                cookie: config.csrf_cookie.clone(),
                header: config.csrf_header.clone(),
                fixed: config.csrf_token.clone(),
            },
        )
    }

    /// Create a client with explicit anti-forgery settings.
    pub fn with_csrf(base_url: &str, timeout: Duration, csrf: CsrfSettings) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| ConsoleError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .user_agent(concat!("audit-console/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| ConsoleError::Http(e.to_string()))?;

        Ok(Self {
            client,
            jar,
            base,
            csrf,
            timeout,
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for a site path.
    pub fn url(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(|e| ConsoleError::InvalidUrl {
            url: path.to_string(),
            message: e.to_string(),
        })
    }

    /// The anti-forgery token, if one is known.
    pub fn csrf_token(&self) -> Option<String> {
        if let Some(token) = &self.csrf.fixed {
            return Some(token.clone());
        }

        let cookies = self.jar.cookies(&self.base)?;
        let cookies = cookies.to_str().ok()?;
        cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.csrf.cookie)
            .map(|(_, value)| value.to_string())
    }

    /// Fetch the login page once so the server hands out its token cookie.
    ///
    /// Returns whether a token is known afterwards.
    pub fn prime(&self) -> bool {
        if self.csrf_token().is_some() {
            return true;
        }

        match self.client.get(self.base.clone()).send() {
            Ok(response) => {
                tracing::debug!("Primed session from {} ({})", self.base, response.status())
            }
            Err(e) => tracing::warn!("Could not reach {}: {}", self.base, e),
        }
        self.csrf_token().is_some()
    }

    /// GET a JSON document.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> std::result::Result<T, SubmitFailure> {
        let url = self.url(path).map_err(|e| SubmitFailure::Transport(e.to_string()))?;
        tracing::debug!("GET {}", url);

        let request = self.decorate(self.client.get(url.clone()));
        let (status, body) = self.send(request, &url)?;

        if !(200..300).contains(&status) {
            return Err(failure_for_status(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("GET {} answered an unexpected document: {}", url, e);
            SubmitFailure::UnexpectedResponse { status }
        })
    }

    /// POST a JSON form.
    ///
    /// The control is disabled and shows its busy label until the call
    /// returns, whatever the outcome. A disabled control refuses the
    /// submission with [`SubmitFailure::InFlight`].
    pub fn submit<T: Serialize + ?Sized>(
        &self,
        control: &mut SubmitControl,
        path: &str,
        payload: &T,
    ) -> std::result::Result<Reply, SubmitFailure> {
        let Some(busy) = control.engage() else {
            return Err(SubmitFailure::InFlight);
        };
        tracing::debug!("{}", busy.control().label());

        let url = self.url(path).map_err(|e| SubmitFailure::Transport(e.to_string()))?;
        tracing::debug!("POST {}", url);

        let request = self.decorate(self.client.post(url.clone()).json(payload));
        let (status, body) = self.send(request, &url)?;
        let reply = classify(status, &body);
        if let Err(failure) = &reply {
            tracing::debug!("POST {} failed: {}", url, failure);
        }
        reply
    }

    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(ACCEPT, "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .header(REFERER, self.base.as_str());

        match self.csrf_token() {
            Some(token) => request.header(self.csrf.header.as_str(), token),
            None => request,
        }
    }

    fn send(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> std::result::Result<(u16, String), SubmitFailure> {
        let response = request.send().map_err(|e| {
            tracing::error!("Request to {} failed: {}", url, e);
            SubmitFailure::Transport(e.to_string())
        })?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| {
            tracing::error!("Reading response from {} failed: {}", url, e);
            SubmitFailure::Transport(e.to_string())
        })?;
        tracing::debug!("{} answered {}", url, status);
        Ok((status, body))
    }
}
