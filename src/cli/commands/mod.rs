//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `fetch`: Batch lyrics download
//! - `config`: Configuration file helpers

mod config;
mod fetch;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use config::{ConfigAction, cmd_config};
pub use fetch::{FetchArgs, cmd_fetch};

/// Download synced and plain lyrics for local audio files from LRCLIB
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch lyrics for audio files or folders
    Fetch(FetchArgs),
    /// Show, locate or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
        /// Configuration file (default: the user config file)
        #[arg(long, global = true)]
        config: Option<PathBuf>,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Fetch(args) => {
            let rt = Runtime::new()?;
            cmd_fetch(&rt, args)
        }
        Commands::Config { action, config } => cmd_config(action, config.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fetch_arguments() {
        let cli = Cli::try_parse_from([
            "lrclib-get",
            "fetch",
            "Music",
            "--write-to",
            "out",
            "--enforce-seconds",
            "true",
            "--second-difference",
            "3",
        ])
        .unwrap();

        let Commands::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(args.paths, vec![PathBuf::from("Music")]);
        assert_eq!(args.write_to, Some(PathBuf::from("out")));
        assert_eq!(args.overrides.enforce_seconds, Some(true));
        assert_eq!(args.overrides.second_difference, Some(3));
        assert_eq!(args.overrides.use_q, None);
    }

    #[test]
    fn test_in_place_conflicts_with_write_to() {
        let result = Cli::try_parse_from(["lrclib-get", "fetch", "Music", "--in-place", "--write-to", "out"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_fetch_requires_a_path() {
        assert!(Cli::try_parse_from(["lrclib-get", "fetch"]).is_err());
    }
}
