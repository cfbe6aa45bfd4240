//! Triggers and the closed set of actions they name.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Everything a trigger can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Toggle,
    LoginSubmit,
    Logout,
    ClientView,
    ClientSave,
    ReportCreate,
    ReportShare,
    ShareSend,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Toggle,
        Action::LoginSubmit,
        Action::Logout,
        Action::ClientView,
        Action::ClientSave,
        Action::ReportCreate,
        Action::ReportShare,
        Action::ShareSend,
    ];

    /// Attribute value naming this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::LoginSubmit => "login-submit",
            Self::Logout => "logout",
            Self::ClientView => "client-view",
            Self::ClientSave => "client-save",
            Self::ReportCreate => "report-create",
            Self::ReportShare => "report-share",
            Self::ShareSend => "share-send",
        }
    }

    /// Whether the action needs a target (element id, client id or report id).
    pub fn needs_target(&self) -> bool {
        matches!(self, Self::Toggle | Self::ClientView | Self::ReportShare)
    }

    /// One-line description for help output.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Toggle => "show or hide a page element",
            Self::LoginSubmit => "log in",
            Self::Logout => "log out",
            Self::ClientView => "show a client record",
            Self::ClientSave => "edit a client's contact details",
            Self::ReportCreate => "create a report with the wizard",
            Self::ReportShare => "pick a report to share",
            Self::ShareSend => "send the picked report by email",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trigger named an action or form that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{name}'")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl FromStr for Action {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownName {
                kind: "action",
                name: s.to_string(),
            })
    }
}

/// Forms whose submission is intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormName {
    Login,
    ClientEdit,
    Share,
    ReportCreate,
}

impl FormName {
    /// Action run when the form is submitted.
    pub fn submit_action(&self) -> Action {
        match self {
            Self::Login => Action::LoginSubmit,
            Self::ClientEdit => Action::ClientSave,
            Self::Share => Action::ShareSend,
            Self::ReportCreate => Action::ReportCreate,
        }
    }
}

impl FromStr for FormName {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "client-edit" => Ok(Self::ClientEdit),
            "share" => Ok(Self::Share),
            "report-create" => Ok(Self::ReportCreate),
            _ => Err(UnknownName {
                kind: "form",
                name: s.to_string(),
            }),
        }
    }
}

/// A user interaction: an action attribute or a form submission, with an
/// optional target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trigger {
    pub action: Option<String>,
    pub target: Option<String>,
    pub form: Option<String>,
}

impl Trigger {
    /// A trigger carrying an action attribute.
    pub fn action(action: impl Into<String>, target: Option<&str>) -> Self {
        Self {
            action: Some(action.into()),
            target: target.map(str::to_string),
            form: None,
        }
    }

    /// A form submission.
    pub fn form(name: impl Into<String>) -> Self {
        Self {
            form: Some(name.into()),
            ..Default::default()
        }
    }

    /// Parse a console line: `<action> [target]` or `submit <form> [target]`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let first = words.next()?;

        if first == "submit" {
            let form = words.next()?;
            return Some(Self {
                form: Some(form.to_string()),
                target: words.next().map(str::to_string),
                action: None,
            });
        }

        Some(Self::action(first, words.next()))
    }

    /// The action this trigger resolves to.
    ///
    /// The action attribute wins over the form name.
    pub fn resolve(&self) -> Result<Option<Action>, UnknownName> {
        if let Some(action) = &self.action {
            return action.parse().map(Some);
        }
        match &self.form {
            Some(form) => form.parse::<FormName>().map(|f| Some(f.submit_action())),
            None => Ok(None),
        }
    }
}
