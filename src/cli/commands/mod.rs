//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`audit-console shell`, `audit-console run`)
//! - Configuration resolved once through [`ConfigSource`]
//! - Consistent global flag handling

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod run;
pub mod shell;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, ConfigSource};
