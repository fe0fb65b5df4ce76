pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "crmsuite",
    about = "CRM Suite operator CLI",
    long_about = "Inspect CRM Suite configuration, check document store readiness, apply migrations, and export entity schemas.",
    after_help = "Examples:\n  crmsuite doctor --json\n  crmsuite config\n  crmsuite schema --entity deal"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Validate config and document store connectivity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Print the entity schema export as JSON")]
    Schema {
        #[arg(long, help = "Only print the descriptor for this entity (for example `contact`)")]
        entity: Option<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Migrate => commands::migrate::run(),
        Command::Schema { entity } => commands::schema::run(entity.as_deref()),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
