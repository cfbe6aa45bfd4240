//! Shell command implementation.
//!
//! The `audit-console shell` command (and the bare `audit-console`) logs in
//! and then reads triggers line by line until `exit`. The session logs out
//! by itself after the configured idle timeout.

use std::time::Duration;

use crate::actions::{logout, Action, ActionDispatcher, Dispatch, Session, Trigger};
use crate::cli::args::ShellArgs;
use crate::error::{ConsoleError, Result};
use crate::http::{FormClient, SubmitControl};
use crate::inactivity::InactivityMonitor;
use crate::ui::{ActivityUI, Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult, ConfigSource};

/// Prompt key for shell input lines.
pub const COMMAND_KEY: &str = "command";

/// The shell command implementation.
pub struct ShellCommand {
    source: ConfigSource,
    args: ShellArgs,
}

impl ShellCommand {
    /// Create a new shell command.
    pub fn new(source: ConfigSource, args: ShellArgs) -> Self {
        Self { source, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ShellArgs {
        &self.args
    }
}

/// Print the trigger reference.
pub fn show_help(ui: &mut dyn UserInterface) {
    ui.show_header("Actions");
    for action in Action::ALL {
        let usage = if action.needs_target() {
            format!("{} <target>", action)
        } else {
            action.to_string()
        };
        ui.show_detail(&usage, action.describe());
    }
    ui.show_detail("submit <form>", "login, client-edit, share or report-create");
    ui.show_detail("exit", "leave the console");
}

/// `10 minutes`, `1 minute`, or whole seconds below a minute.
fn describe_timeout(timeout: Duration) -> String {
    let secs = timeout.as_secs();
    let (count, unit) = if secs < 60 {
        (secs, "second")
    } else {
        (secs / 60, "minute")
    };
    format!("{} {}{}", count, unit, if count == 1 { "" } else { "s" })
}

/// Arm the monitor that logs the session out after `timeout` of silence.
fn arm_idle_logout(client: &FormClient, logout_path: &str, timeout: Duration) -> InactivityMonitor {
    let client = client.clone();
    let path = logout_path.to_string();
    InactivityMonitor::arm(timeout, move || {
        let mut control = SubmitControl::new("Logout", "Logging out...");
        let navigation = logout(&client, &mut control, &path);
        tracing::debug!("Idle logout finished with {:?}", navigation);
        let notice = format!(
            "\nSession expired after {} of inactivity.",
            describe_timeout(timeout)
        );
        if console::Term::stderr().write_line(&notice).is_err() {
            tracing::warn!("{}", notice.trim());
        }
        std::process::exit(0);
    })
}

impl Command for ShellCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !ui.is_interactive() {
            ui.error("The shell needs a terminal. Use 'audit-console run <action>' in scripts.");
            return Ok(CommandResult::failure(2));
        }

        let config = self.source.load()?;
        ui.show_header(&format!("Audit Console - {}", config.base_url));

        let session = Session::new(config)?;
        let monitor = arm_idle_logout(
            session.client(),
            &session.config().logout_path,
            session.config().idle_timeout(),
        );
        let mut dispatcher = ActionDispatcher::new(session);
        let mut ui = ActivityUI::new(ui, monitor.recorder());
        let ui: &mut dyn UserInterface = &mut ui;

        if !self.args.no_login {
            dispatcher.dispatch(&Trigger::form("login"), ui)?;
        }
        ui.message("Type 'help' for the list of actions.");

        let prompt = Prompt::input(COMMAND_KEY, "›");
        loop {
            let line = match ui.prompt(&prompt) {
                Ok(answer) => answer.as_string(),
                Err(ConsoleError::Prompt { message, .. }) => {
                    tracing::debug!("Input closed: {}", message);
                    break;
                }
                Err(e) => return Err(e),
            };

            match line.trim() {
                "" => continue,
                "exit" | "quit" => break,
                "help" => {
                    show_help(ui);
                    continue;
                }
                _ => {}
            }

            let handled = match Trigger::parse(&line) {
                Some(trigger) => dispatcher.dispatch(&trigger, ui)?,
                None => Dispatch::Ignored,
            };
            if handled == Dispatch::Ignored {
                ui.warning(&format!(
                    "Nothing to do for '{}'. Type 'help' for the list of actions.",
                    line.trim()
                ));
            }
        }

        monitor.disarm();
        Ok(CommandResult::success())
    }
}
