//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`ConfigSource`] for resolving configuration the same way everywhere
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, ShellArgs};
use crate::config::{load_config, ConsoleConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where configuration comes from for one invocation.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    /// Directory searched for `.audit-console.yml`.
    pub work_dir: PathBuf,
    /// `--config` file.
    pub explicit: Option<PathBuf>,
    /// `--url` override.
    pub url: Option<String>,
    /// Environment variables.
    pub env: HashMap<String, String>,
}

impl ConfigSource {
    /// A source reading the process environment.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            env: std::env::vars().collect(),
            ..Default::default()
        }
    }

    /// Load, apply `--url` and validate.
    pub fn load(&self) -> Result<ConsoleConfig> {
        let mut config = load_config(&self.work_dir, self.explicit.as_deref(), &self.env)?;
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        config.validate()?;
        tracing::debug!("Resolved configuration for {}", config.base_url);
        Ok(config)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    source: ConfigSource,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given config source.
    pub fn new(source: ConfigSource) -> Self {
        Self { source }
    }

    /// Get the working directory.
    pub fn work_dir(&self) -> &Path {
        &self.source.work_dir
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Shell(args)) => {
                let cmd = super::shell::ShellCommand::new(self.source.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Run(args)) => {
                let cmd = super::run::RunCommand::new(self.source.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Config(args)) => {
                let cmd = super::config::ConfigCommand::new(self.source.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to an interactive shell
                let cmd = super::shell::ShellCommand::new(self.source.clone(), ShellArgs::default());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::ConfigArgs;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn source(temp: &TempDir) -> ConfigSource {
        ConfigSource {
            work_dir: temp.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn command_result_codes() {
        assert_eq!(CommandResult::success().exit_code, 0);
        let failed = CommandResult::failure(2);
        assert!(!failed.success);
        assert_eq!(failed.exit_code, 2);
    }

    #[test]
    fn url_flag_overrides_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".audit-console.yml"), "base_url: http://file").unwrap();

        let config = ConfigSource {
            url: Some("https://flag.example".into()),
            ..source(&temp)
        }
        .load()
        .unwrap();
        assert_eq!(config.base_url, "https://flag.example");
    }

    #[test]
    fn invalid_url_fails_validation() {
        let temp = TempDir::new().unwrap();
        let err = ConfigSource {
            url: Some("ftp://files.example".into()),
            ..source(&temp)
        }
        .load()
        .unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn dispatches_config_command() {
        let temp = TempDir::new().unwrap();
        let dispatcher = CommandDispatcher::new(source(&temp));
        let cli = Cli {
            config: None,
            url: None,
            verbose: false,
            quiet: false,
            no_color: false,
            debug: false,
            command: Some(Commands::Config(ConfigArgs::default())),
        };
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert_eq!(dispatcher.work_dir(), temp.path());
    }
}
