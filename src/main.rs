//! Audit Console CLI entry point.

use std::process::ExitCode;

use audit_console::cli::{Cli, CommandDispatcher, Commands, ConfigSource};
use audit_console::ui::{create_ui, OutputMode};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("audit_console=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("audit_console=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Audit Console starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    // Handle --no-color
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let work_dir = std::env::current_dir().unwrap_or_default();
    let source = ConfigSource {
        explicit: cli.config.clone(),
        url: cli.url.clone(),
        ..ConfigSource::new(work_dir)
    };

    let is_interactive = match &cli.command {
        Some(Commands::Run(args)) => !args.non_interactive,
        Some(Commands::Config(_)) | Some(Commands::Completions(_)) => false,
        Some(Commands::Shell(_)) | None => true,
    };

    let mut ui = create_ui(is_interactive, output_mode);
    let dispatcher = CommandDispatcher::new(source);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
