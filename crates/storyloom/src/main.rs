//! Storyloom CLI binary.
//!
//! `storyloom run [--date YYYY-MM-DD]` executes the daily pipeline once.

use clap::Parser;
use std::process::ExitCode;
use storyloom::{Outcome, StoryloomConfig, init_tracing};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, Commands, run_daily};

    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match StoryloomConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging, cli.verbose);

    match cli.command {
        Commands::Run { date } => match run_daily(&config, date.as_deref()).await {
            Ok(outcome) => {
                match &outcome {
                    Outcome::Completed(report) | Outcome::Cancelled(report) => {
                        for character in &report.characters {
                            tracing::info!(
                                character_id = %character.character_id(),
                                story = %character.story(),
                                images = %character.images(),
                                uploaded = character.images_uploaded(),
                                "Character finished"
                            );
                        }
                    }
                    Outcome::NothingScheduled | Outcome::Failed(_) => {}
                }
                tracing::info!(outcome = %outcome, "Run finished");
                if outcome.is_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Run could not start");
                ExitCode::FAILURE
            }
        },
    }
}
