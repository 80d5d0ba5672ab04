//! LRCLib Get - batch lyrics downloader.
//!
//! Matches local audio files to records of the LRCLIB lyrics database and
//! saves the plain lyrics, synced lyrics and raw responses either into a zip
//! archive or straight into a folder tree.

pub mod cli;
pub mod config;
pub mod error;
pub mod lookup;
pub mod metadata;
pub mod model;
pub mod paths;
pub mod pipeline;
pub mod scanner;
pub mod sink;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging; RUST_LOG adds to the default directive
    let directive = if args.verbose {
        "lrclib_get=debug"
    } else {
        "lrclib_get=info"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    cli::run_command(&args)
}
