//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Audit Console - terminal client for the internal auditing workspace.
#[derive(Debug, Parser)]
#[command(name = "audit-console")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (replaces ~/.audit-console/config.yml and .audit-console.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Workspace URL (overrides config and AUDIT_CONSOLE_URL)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive session (default if no command specified)
    Shell(ShellArgs),

    /// Log in, run one action and exit
    Run(RunArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `shell` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShellArgs {
    /// Start without logging in
    #[arg(long)]
    pub no_login: bool,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Action to run (e.g. client-view, report-create, share-send)
    pub action: String,

    /// Element id, client id or report id the action works on
    pub target: Option<String>,

    /// Report id to share with (runs report-share before share-send)
    #[arg(long, value_name = "REPORT_ID")]
    pub report: Option<String>,

    /// Skip logging in first
    #[arg(long)]
    pub no_login: bool,

    /// Answer prompts from AUDIT_CONSOLE_PROMPT_* variables and defaults
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_none() {
        let cli = Cli::parse_from(["audit-console"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn run_takes_action_and_target() {
        let cli = Cli::parse_from(["audit-console", "run", "client-view", "4", "--no-login"]);
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.action, "client-view");
        assert_eq!(args.target.as_deref(), Some("4"));
        assert!(args.no_login);
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from([
            "audit-console",
            "config",
            "--url",
            "https://audit.example",
            "--quiet",
        ]);
        assert_eq!(cli.url.as_deref(), Some("https://audit.example"));
        assert!(cli.quiet);
    }
}
