//! Shell completions generation.
//!
//! The `audit-console completions` command generates shell completion scripts.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::UserInterface;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

/// Binary name completions are generated for.
const BIN_NAME: &str = "audit-console";

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// Write the completion script to `out`.
    pub fn generate(&self, out: &mut dyn std::io::Write) {
        let mut cmd = Cli::command();
        clap_complete::generate(self.args.shell, &mut cmd, BIN_NAME, out);
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        self.generate(&mut std::io::stdout());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        CompletionsCommand::new(CompletionsArgs { shell }).generate(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn generates_bash_completions() {
        let output = script(Shell::Bash);
        assert!(output.contains("audit-console"));
        assert!(output.contains("complete"));
    }

    #[test]
    fn generates_zsh_completions() {
        let output = script(Shell::Zsh);
        assert!(output.contains("audit-console"));
    }

    #[test]
    fn completions_list_subcommands() {
        let output = script(Shell::Fish);
        assert!(output.contains("shell"));
        assert!(output.contains("run"));
    }
}
