//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the CLI
//! uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - [`ConfigError`] converts into it with `?`
//! - Lookup and output failures never surface here; the pipeline folds them
//!   into its per-file reports instead
//!
//! # Example
//!
//! ```ignore
//! use lrclib_get::error::{Result, ResultExt};
//!
//! fn load(path: &Path) -> Result<Config> {
//!     config::load_from(path).with_context("loading --config")
//! }
//! ```

use std::path::PathBuf;

use crate::config::ConfigError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input path does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Options that cannot be used together
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create an invalid arguments error.
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, ConfigError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Config(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("/path/to/album");
        assert!(err.to_string().contains("/path/to/album"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::invalid_arguments("--in-place needs a directory").context("preparing output");
        let msg = err.to_string();
        assert!(msg.starts_with("preparing output"));
        assert!(msg.contains("--in-place"));
    }

    #[test]
    fn test_config_conversion() {
        let err: Error = ConfigError::NoConfigDir.into();
        assert!(err.to_string().contains("config directory"));
    }

    #[test]
    fn test_result_ext() {
        let result: std::result::Result<(), ConfigError> = Err(ConfigError::NoConfigDir);
        let with_ctx = result.with_context("Loading settings.toml");
        let msg = with_ctx.unwrap_err().to_string();
        assert!(msg.starts_with("Loading settings.toml"));
        assert!(msg.contains("config directory"));
    }
}
