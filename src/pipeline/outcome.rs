//! Per-file results and the batch error log.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::model::{AudioFile, TrackInfo};
use crate::sink::{SinkError, TrackBundle};

/// Terminal result of processing one file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Lyrics found and written
    Success {
        /// Sink paths that received content
        written: Vec<String>,
    },
    /// 404, an empty response, or no usable candidate
    NotFound,
    /// Non-404 error status from the service
    ServerError { status: u16 },
    /// Not enough information to build a query; no request was made
    MissingInformation,
    /// The request could not be completed or its body decoded
    RequestFailed { message: String },
    /// The sink rejected a write; later writes for the file were skipped
    WriteFailed { message: String },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { .. } => write!(f, "Successful"),
            Self::NotFound => write!(f, "DATABASE ITEM NOT FOUND"),
            Self::ServerError { status } => write!(f, "SERVER ERROR: {}", status),
            Self::MissingInformation => write!(f, "MISSING FILE INFORMATION"),
            Self::RequestFailed { message } => write!(f, "REQUEST FAILED: {}", message),
            Self::WriteFailed { message } => write!(f, "WRITE FAILURE: {}", message),
        }
    }
}

/// One row of progress, emitted for every processed file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub file_name: String,
    pub original_path: Option<String>,
    /// Relative identifier used for output paths
    pub path: String,
    pub info: TrackInfo,
    pub outcome: FileOutcome,
    /// Single-track re-download, present on success
    pub bundle: Option<TrackBundle>,
}

impl FileReport {
    /// The original path, or the file name when there is none.
    pub fn label(&self) -> &str {
        match self.original_path.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => &self.file_name,
        }
    }
}

/// Human-readable log of every failed file, one line each.
#[derive(Debug, Default)]
pub struct ErrorLog {
    text: String,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `[<reason>] <label>` for a failed outcome. Successes are ignored.
    pub fn record(&mut self, file: &AudioFile, outcome: &FileOutcome) {
        if outcome.is_success() {
            return;
        }
        self.text.push_str(&format!("[{}] {}\n", outcome, file.label()));
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// The finished archive of a batch.
#[derive(Debug, Clone)]
pub struct ArchiveBundle {
    /// `LyricsDownload-<root>-<millis>.zip`
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveBundle {
    /// Write the archive into `dir` under its own name.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, SinkError> {
        std::fs::create_dir_all(dir).map_err(|e| SinkError::io(dir, e))?;
        let target = dir.join(&self.name);
        std::fs::write(&target, &self.bytes).map_err(|e| SinkError::io(&target, e))?;
        Ok(target)
    }
}

/// Totals for a finished batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Files that produced an outcome
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Files skipped because lyrics were already present
    pub skipped: usize,
    /// Whether the batch stopped early on request
    pub cancelled: bool,
    /// Name of the error log artifact, when one was written
    pub error_log: Option<String>,
    /// Present when the batch wrote into an archive
    pub archive: Option<ArchiveBundle>,
}
