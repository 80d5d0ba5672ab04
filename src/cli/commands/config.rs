//! Configuration file commands.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::{self, Config};
use crate::error::{Error, Result, ResultExt};

/// What to do with the configuration file
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print where the configuration file lives
    Path,
    /// Write a configuration file with default values
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a `config` subcommand against `path` or the user config file
pub fn cmd_config(action: &ConfigAction, path: Option<&Path>) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(path)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", target_path(path)?.display());
        }
        ConfigAction::Init { force } => {
            let target = target_path(path)?;
            if target.exists() && !force {
                println!("Config already exists at {} (use --force to replace it)", target.display());
                return Ok(());
            }
            config::save_to(&Config::default(), &target)?;
            println!("Wrote default config to {}", target.display());
        }
    }
    Ok(())
}

/// The explicit config file, or the user config with defaults as fallback.
pub(super) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => config::load_from(path).with_context(format!("Loading {}", path.display())),
        None => Ok(config::load()),
    }
}

fn target_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => config::config_path().ok_or_else(|| Error::Config(config::ConfigError::NoConfigDir)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempdir().unwrap();
        let result = load_config(Some(dir.path().join("missing.toml").as_path()));
        assert!(matches!(result, Err(Error::WithContext { .. })));
    }

    #[test]
    fn test_init_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        cmd_config(&ConfigAction::Init { force: false }, Some(path.as_path())).unwrap();
        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.options.second_difference, 5);
        assert_eq!(config.service.base_url, "https://lrclib.net/api");
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[options]\nuse_q = true\n").unwrap();

        cmd_config(&ConfigAction::Init { force: false }, Some(path.as_path())).unwrap();
        assert!(load_config(Some(path.as_path())).unwrap().options.use_q);

        cmd_config(&ConfigAction::Init { force: true }, Some(path.as_path())).unwrap();
        assert!(!load_config(Some(path.as_path())).unwrap().options.use_q);
    }
}
