//! Run command implementation.
//!
//! The `audit-console run <action> [target]` command logs in, dispatches a
//! single trigger and reports through the exit code whether the page ended
//! up showing an error.

use crate::actions::{Action, ActionDispatcher, Dispatch, Session, Trigger};
use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ConfigSource};

/// The run command implementation.
pub struct RunCommand {
    source: ConfigSource,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(source: ConfigSource, args: RunArgs) -> Self {
        Self { source, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    fn trigger(&self) -> Trigger {
        Trigger::action(self.args.action.clone(), self.args.target.as_deref())
    }

    /// Whether a login should run before the trigger.
    fn needs_login(&self) -> bool {
        !self.args.no_login
            && !matches!(
                self.args.action.parse::<Action>(),
                Ok(Action::LoginSubmit | Action::Logout)
            )
    }
}

/// Dispatch one trigger; `false` if it was ignored or left an error up.
fn step(dispatcher: &mut ActionDispatcher, trigger: &Trigger, ui: &mut dyn UserInterface) -> Result<bool> {
    let dispatched = dispatcher.dispatch(trigger, ui)?;
    Ok(dispatched != Dispatch::Ignored && !dispatcher.session().page().has_errors())
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let trigger = self.trigger();
        if !matches!(trigger.resolve(), Ok(Some(_))) {
            ui.error(&format!(
                "Unknown action '{}'. Run 'audit-console shell' and type 'help' for the list.",
                self.args.action
            ));
            return Ok(CommandResult::failure(2));
        }

        let config = self.source.load()?;
        let mut dispatcher = ActionDispatcher::new(Session::new(config)?);

        if self.needs_login() && !step(&mut dispatcher, &Trigger::form("login"), ui)? {
            ui.error("Login failed");
            return Ok(CommandResult::failure(1));
        }

        if let Some(report) = &self.args.report {
            let pick = Trigger::action(Action::ReportShare.as_str(), Some(report));
            step(&mut dispatcher, &pick, ui)?;
        }

        if step(&mut dispatcher, &trigger, ui)? {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
