pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "souq",
    about = "Souq chatbot operator CLI",
    long_about = "Resolve chatbot intents against the configured backend, inspect config, and run readiness checks.",
    after_help = "Examples:\n  souq ask orders \"show my orders\" --token $JWT\n  souq config\n  souq doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Resolve one intent/message pair against the configured backend")]
    Ask {
        #[arg(help = "Intent label, e.g. orders, track_order, go_to_cart")]
        intent: String,
        #[arg(help = "The raw chat message (ids are extracted from it)")]
        message: String,
        #[arg(long, help = "Bearer token forwarded to the backend")]
        token: Option<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config and probe backend reachability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Ask { intent, message, token } => {
            commands::ask::run(&intent, &message, token.as_deref())
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
