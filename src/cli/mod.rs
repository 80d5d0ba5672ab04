//! Command-line interface for lrclib-get.
//!
//! This module provides the `fetch` command, which runs a batch, and the
//! `config` command for inspecting the configuration file.

mod commands;

pub use commands::{Cli, Commands, run_command};
