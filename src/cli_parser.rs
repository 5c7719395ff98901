//! CLI argument parsing and help text.

/// Print general usage information.
pub fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "modguard - moderation core v{}

USAGE:
    modguard-cli [COMMAND] [OPTIONS]

COMMANDS:
    serve        Run the moderation API server (default when no command given)
    config       Manage configuration (show, defaults, validate)
    version      Show version information
    help         Show this help message

OPTIONS:
    -h, --help      Show help for command
    -V, --version   Show version information
    --config PATH   Configuration file (TOML)

EXAMPLES:
    modguard-cli                           # Run the API server with defaults
    modguard-cli serve --config mod.toml   # Run with a configuration file
    modguard-cli config validate --config mod.toml
    modguard-cli config defaults           # Print default configuration
",
        version
    );
}

/// Print help for a specific command.
pub fn print_command_help(command: &str) {
    match command {
        "serve" => {
            eprintln!(
                "modguard-cli serve [--config PATH]

Runs the HTTP moderation API until interrupted. Without --config the
built-in defaults and the built-in signature catalog are used."
            );
        }
        "config" => {
            eprintln!(
                "modguard-cli config <SUBCOMMAND> [--config PATH]

SUBCOMMANDS:
    show       Print the configuration that `serve` would use
    defaults   Print the built-in defaults as TOML
    validate   Exit non-zero if the configuration fails validation"
            );
        }
        other => {
            eprintln!("No detailed help for '{}'.", other);
            print_usage();
        }
    }
}

/// Subcommand named by the arguments. A leading option such as `--config`
/// selects the default `serve` command rather than being mistaken for a
/// subcommand name.
pub fn command(args: &[String]) -> &str {
    match args.get(1).map(|s| s.as_str()) {
        None | Some("") => "serve",
        Some("-h" | "--help") => "help",
        Some("-V" | "--version") => "version",
        Some(arg) if arg.starts_with('-') => "serve",
        Some(cmd) => cmd,
    }
}

/// Value following `--config`, if present.
pub fn config_path(args: &[String]) -> Option<String> {
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .cloned()
}
