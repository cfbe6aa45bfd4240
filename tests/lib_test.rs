//! Library integration tests.

use audit_console::ConsoleError;

#[test]
fn error_types_are_public() {
    let err = ConsoleError::InvalidUrl {
        url: "ftp://files".into(),
        message: "unsupported scheme 'ftp'".into(),
    };
    assert!(err.to_string().contains("ftp://files"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> audit_console::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use audit_console::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["audit-console", "config", "--json"]);
    if let Some(Commands::Config(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Config command");
    }
}

#[test]
fn actions_round_trip_through_their_names() {
    use audit_console::actions::Action;

    for action in Action::ALL {
        assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
    }
}
