//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\lrclib-get\config.toml
//! - macOS: ~/Library/Application Support/lrclib-get/config.toml
//! - Linux: ~/.config/lrclib-get/config.toml
//!
//! The config file is human-readable and editable. Every matching option can
//! also be overridden per run from the command line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Matching and output options for a batch
    pub options: Options,

    /// Remote lyrics service settings
    pub service: ServiceConfig,
}

/// Options controlling how files are matched and what gets written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Require an album tag before building a metadata query
    pub send_album: bool,
    /// Require an artist tag before building a metadata query
    pub send_artist: bool,
    /// Require a duration before building a metadata query
    pub send_duration: bool,
    /// Fall back to the filename when metadata is insufficient
    pub use_file_name: bool,
    /// Skip metadata entirely and always query by filename
    pub force_file_name: bool,
    /// Tolerance in seconds for duration-based candidate matching
    pub second_difference: u32,
    /// Report "not found" instead of taking the first candidate when no duration matches
    pub enforce_seconds: bool,
    /// Send one free-text `q` parameter instead of separate fields
    pub use_q: bool,
    /// Persist the raw API response
    pub keep_json: bool,
    /// Persist plain lyrics
    pub keep_txt: bool,
    /// Persist synced lyrics
    pub keep_lrc: bool,
    /// Write straight into the scanned directory instead of an archive
    pub write_in_place: bool,
    /// Lower bound of the delay after each lookup, in milliseconds
    pub min_wait: u64,
    /// Upper bound of the delay after each lookup, in milliseconds
    pub max_wait: u64,
    /// Comma-separated suffixes admitted when scanning directories (empty = all)
    pub allowed_extensions: String,
    /// Skip tracks that already have an `.lrc` file in the batch
    pub check_lrc: bool,
    /// Match existing `.lrc` files by filename only, in any folder
    pub check_only_lrc_file_name: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            send_album: true,
            send_artist: true,
            send_duration: true,
            use_file_name: true,
            force_file_name: false,
            second_difference: 5,
            enforce_seconds: false,
            use_q: false,
            keep_json: true,
            keep_txt: true,
            keep_lrc: true,
            write_in_place: false,
            min_wait: 100,
            max_wait: 400,
            allowed_extensions: String::new(),
            check_lrc: false,
            check_only_lrc_file_name: false,
        }
    }
}

impl Options {
    /// Fix up inconsistent values instead of rejecting them.
    ///
    /// Swapped wait bounds are put back in order.
    pub fn normalized(mut self) -> Self {
        if self.max_wait < self.min_wait {
            tracing::warn!(
                "max_wait ({}) is below min_wait ({}), swapping",
                self.max_wait,
                self.min_wait
            );
            std::mem::swap(&mut self.min_wait, &mut self.max_wait);
        }
        self
    }
}

/// Remote lyrics service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the API (the `/search` endpoint is appended)
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://lrclib.net/api".to_string(),
            timeout_secs: 30,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lrclib-get"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path
///
/// Unlike [`load`], a missing or broken file is an error: the user asked for it.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Save configuration to a path
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[options]"));
        assert!(toml.contains("[service]"));
        assert!(toml.contains("min_wait = 100"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.options.use_q = true;
        config.options.second_difference = 3;
        config.service.base_url = "http://localhost:9999/api".to_string();

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert!(parsed.options.use_q);
        assert_eq!(parsed.options.second_difference, 3);
        assert_eq!(parsed.service.base_url, "http://localhost:9999/api");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[options]
enforce_seconds = true
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert!(config.options.enforce_seconds);
        // Other fields use defaults
        assert!(config.options.send_album);
        assert_eq!(config.options.max_wait, 400);
        assert_eq!(config.service.timeout_secs, 30);
    }

    #[test]
    fn test_normalized_swaps_wait_bounds() {
        let options = Options {
            min_wait: 500,
            max_wait: 100,
            ..Default::default()
        }
        .normalized();
        assert_eq!((options.min_wait, options.max_wait), (100, 500));
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.options.check_lrc = true;
        save_to(&config, &path).unwrap();

        let loaded = load_from(&path).unwrap();
        assert!(loaded.options.check_lrc);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_load_from_broken_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "options = [not valid").unwrap();

        assert!(matches!(load_from(&path), Err(ConfigError::Parse(..))));
        assert!(matches!(
            load_from(&dir.path().join("missing.toml")),
            Err(ConfigError::Read(..))
        ));
    }
}
