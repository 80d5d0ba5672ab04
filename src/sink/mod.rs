//! Destinations for written artifacts.
//!
//! A batch writes every artifact through one [`ArtifactSink`]:
//! - [`ArchiveSink`] collects entries in memory and is serialized to a zip when
//!   the batch finishes.
//! - [`DirectorySink`] writes each entry straight into a directory tree,
//!   creating folders as needed; finishing is a no-op.
//!
//! The variant is chosen once, when the sink is constructed. Writing the same
//! path twice keeps the last content in both variants.

mod archive;
mod bundle;
mod directory;

use std::path::PathBuf;

pub use archive::ArchiveSink;
pub use bundle::TrackBundle;
pub use directory::DirectorySink;

/// Errors raised while writing artifacts
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Invalid artifact path: {0:?}")]
    InvalidPath(String),
}

impl SinkError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Where a batch puts its artifacts.
#[derive(Debug)]
pub enum ArtifactSink {
    Archive(ArchiveSink),
    Directory(DirectorySink),
}

impl ArtifactSink {
    /// An in-memory zip archive.
    pub fn archive() -> Self {
        Self::Archive(ArchiveSink::new())
    }

    /// A live directory tree rooted at `root`.
    pub fn directory(root: impl Into<PathBuf>) -> Self {
        Self::Directory(DirectorySink::new(root))
    }

    /// Write `content` under the `/`-separated relative `path`.
    ///
    /// Empty content is skipped: an absent lyric body produces no file.
    pub async fn write(&mut self, path: &str, content: &str) -> Result<(), SinkError> {
        if content.is_empty() {
            return Ok(());
        }
        match self {
            Self::Archive(archive) => {
                archive.add(path, content.as_bytes());
                Ok(())
            }
            Self::Directory(dir) => dir.write(path, content.as_bytes()).await,
        }
    }

    /// Finish the batch. Archives return their serialized zip bytes.
    pub fn finalize(self) -> Result<Option<Vec<u8>>, SinkError> {
        match self {
            Self::Archive(archive) => archive.into_zip().map(Some),
            Self::Directory(_) => Ok(None),
        }
    }

    /// Human-readable description for logs
    pub fn describe(&self) -> String {
        match self {
            Self::Archive(archive) => format!("zip archive ({} entries)", archive.len()),
            Self::Directory(dir) => format!("directory {:?}", dir.root()),
        }
    }
}
