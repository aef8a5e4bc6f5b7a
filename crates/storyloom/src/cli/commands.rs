//! CLI command definitions.

use clap::{Parser, Subcommand};

/// Storyloom - write, illustrate and publish one story per character per day
#[derive(Parser, Debug)]
#[command(name = "storyloom")]
#[command(about = "Daily illustrated-story pipeline", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline for one day
    Run {
        /// Day to process as YYYY-MM-DD; today in the configured zone by default
        #[arg(long)]
        date: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_accepts_date() {
        let cli = Cli::try_parse_from(["storyloom", "run", "--date", "2025-06-23", "-v"]).unwrap();
        assert!(cli.verbose);
        let Commands::Run { date } = cli.command;
        assert_eq!(date.as_deref(), Some("2025-06-23"));
    }

    #[test]
    fn test_date_is_optional() {
        let cli = Cli::try_parse_from(["storyloom", "run"]).unwrap();
        let Commands::Run { date } = cli.command;
        assert!(date.is_none());
    }
}
