//! Moderation core entry point.
//!
//! Bootstraps logging, configuration, and the signature store, then runs
//! the HTTP moderation API.

mod cli_parser;
mod runtime_init;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = cli_parser::command(&args);

    match command {
        "serve" => run_serve(&args).await,
        "help" => {
            if let Some(sub) = args.get(2) {
                cli_parser::print_command_help(sub);
            } else {
                cli_parser::print_usage();
            }
            ExitCode::SUCCESS
        }
        "version" => {
            println!("modguard {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        "config" => run_config_cmd(&args),
        _ => {
            eprintln!("Unknown command: {}", command);
            cli_parser::print_usage();
            ExitCode::FAILURE
        }
    }
}

async fn run_serve(args: &[String]) -> ExitCode {
    let path = cli_parser::config_path(args);
    let config = match runtime_init::load_config(path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    runtime_init::init_logging(config.log_json);
    match runtime_init::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_config_cmd(args: &[String]) -> ExitCode {
    let sub = args.get(2).map(|s| s.as_str()).unwrap_or("show");
    let path = cli_parser::config_path(args);

    match sub {
        "show" => match runtime_init::load_config(path.as_deref()) {
            Ok(config) => match toml::to_string_pretty(&config) {
                Ok(rendered) => {
                    println!("{}", rendered);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Failed to render configuration: {}", e);
                    ExitCode::FAILURE
                }
            },
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                ExitCode::FAILURE
            }
        },
        "defaults" => match toml::to_string_pretty(&modguard::Config::default()) {
            Ok(rendered) => {
                println!("{}", rendered);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to render defaults: {}", e);
                ExitCode::FAILURE
            }
        },
        "validate" => match runtime_init::load_config(path.as_deref()) {
            Ok(_) => {
                println!("Configuration OK");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Configuration invalid: {}", e);
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("Unknown config subcommand: {}", sub);
            cli_parser::print_command_help("config");
            ExitCode::FAILURE
        }
    }
}
