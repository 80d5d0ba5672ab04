//! Single-track archives built on request.
//!
//! Each successful report carries a [`TrackBundle`]. The first call to
//! [`TrackBundle::download`] packages that track's artifacts into its own zip
//! and records where it went; later calls do nothing.

use std::path::{Path, PathBuf};

use super::{ArchiveSink, SinkError};
use crate::paths;

/// The artifacts of one matched track, ready to be packaged again.
#[derive(Debug, Clone)]
pub struct TrackBundle {
    /// Relative identifier of the track (`Sub/Song`)
    path: String,
    json: String,
    plain: Option<String>,
    synced: Option<String>,
    resolved: Option<PathBuf>,
}

impl TrackBundle {
    pub fn new(path: impl Into<String>, json: String, plain: Option<String>, synced: Option<String>) -> Self {
        Self {
            path: path.into(),
            json,
            plain,
            synced,
            resolved: None,
        }
    }

    /// File name of the bundle (`Song.zip`)
    pub fn file_name(&self) -> String {
        format!("{}.zip", paths::leaf(&self.path))
    }

    /// Write the bundle into `dir` the first time; afterwards return `None`.
    pub fn download(&mut self, dir: &Path) -> Result<Option<PathBuf>, SinkError> {
        if self.resolved.is_some() {
            return Ok(None);
        }

        let mut archive = ArchiveSink::new();
        archive.add(&format!("{}.json", self.path), self.json.as_bytes());
        if let Some(plain) = self.plain.as_deref().filter(|s| !s.is_empty()) {
            archive.add(&format!("{}.txt", self.path), plain.as_bytes());
        }
        if let Some(synced) = self.synced.as_deref().filter(|s| !s.is_empty()) {
            archive.add(&format!("{}.lrc", self.path), synced.as_bytes());
        }
        let bytes = archive.into_zip()?;

        std::fs::create_dir_all(dir).map_err(|e| SinkError::io(dir, e))?;
        let target = dir.join(self.file_name());
        std::fs::write(&target, bytes).map_err(|e| SinkError::io(&target, e))?;

        tracing::debug!("Bundled {} into {:?}", self.path, target);
        self.resolved = Some(target.clone());
        Ok(Some(target))
    }
}
