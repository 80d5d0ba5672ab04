//! Core data models shared by the matching pipeline.
//!
//! Defines the primary entities: [`AudioFile`], [`Tags`] and [`TrackInfo`].
//!
//! An [`AudioFile`] is the value that travels through every stage of a batch.
//! It pairs the file content with the relative path it was found under, so no
//! stage ever needs to annotate or mutate the input.

use std::path::PathBuf;
use std::sync::Arc;

/// Where the bytes of an audio file live.
#[derive(Debug, Clone)]
pub enum AudioSource {
    /// Content already loaded into memory.
    Memory(Arc<[u8]>),
    /// Content read lazily from disk when a probe needs it.
    Disk(PathBuf),
}

/// One input file of a batch.
#[derive(Debug, Clone)]
pub struct AudioFile {
    /// The file content
    pub source: AudioSource,
    /// Display name, including the extension (e.g. `Song.mp3`)
    pub name: String,
    /// Relative path including a synthetic root segment (e.g. `Root/Sub/Song.mp3`)
    pub original_path: Option<String>,
}

impl AudioFile {
    /// A file read from disk, optionally placed under a relative path.
    pub fn from_disk(path: impl Into<PathBuf>, original_path: Option<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            source: AudioSource::Disk(path),
            name,
            original_path,
        }
    }

    /// A file whose bytes are already in memory.
    pub fn from_bytes(
        name: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
        original_path: Option<String>,
    ) -> Self {
        Self {
            source: AudioSource::Memory(data.into()),
            name: name.into(),
            original_path,
        }
    }

    /// The original relative path, or the display name when there is none.
    ///
    /// This is the label used in error log lines.
    pub fn label(&self) -> &str {
        match self.original_path.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => &self.name,
        }
    }

}

/// Embedded tag fields relevant to a lyrics lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Best-effort identification of a file, shown for every report row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackInfo {
    /// Track title (tag title, or the filename stem)
    pub track: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Duration in seconds, when the duration probe succeeded
    pub duration: Option<f64>,
}

impl TrackInfo {
    /// Artist for display, `-` when unknown.
    pub fn artist_display(&self) -> &str {
        self.artist.as_deref().unwrap_or("-")
    }

    /// Album for display, `-` when unknown.
    pub fn album_display(&self) -> &str {
        self.album.as_deref().unwrap_or("-")
    }

    /// Duration for display, `-` when unknown.
    pub fn duration_display(&self) -> String {
        self.duration
            .map(|d| format!("{:.0}s", d))
            .unwrap_or_else(|| "-".to_string())
    }
}
