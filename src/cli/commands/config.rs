//! Config command implementation.
//!
//! The `audit-console config` command shows resolved configuration.

use crate::cli::args::ConfigArgs;
use crate::config::ConfigPaths;
use crate::error::{ConsoleError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ConfigSource};

/// The config command implementation.
pub struct ConfigCommand {
    source: ConfigSource,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(source: ConfigSource, args: ConfigArgs) -> Self {
        Self { source, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match self.source.load() {
            Ok(c) => c,
            Err(ConsoleError::ConfigNotFound { path }) => {
                ui.error(&format!("Config file not found: {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        // Show config file path(s)
        let existing = match &self.source.explicit {
            Some(path) => vec![path.clone()],
            None => ConfigPaths::discover(&self.source.work_dir)
                .all_existing()
                .into_iter()
                .cloned()
                .collect(),
        };
        if !existing.is_empty() {
            for path in &existing {
                ui.message(&format!("# {}", path.display()));
            }
            ui.message("");
        }

        // Output format
        if self.args.json {
            let json =
                serde_json::to_string_pretty(&config).map_err(|e| ConsoleError::Other(e.into()))?;
            ui.message(&json);
        } else {
            let yaml = serde_yaml::to_string(&config).map_err(|e| ConsoleError::Other(e.into()))?;
            ui.message(&yaml);
        }

        Ok(CommandResult::success())
    }
}
