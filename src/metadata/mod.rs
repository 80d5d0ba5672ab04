//! Metadata probing for batch files.
//!
//! Uses the lofty crate for format-independent tag and property access.
//! Two independent probes run for each file:
//! - the tag probe (title, artist, album)
//! - the duration probe (length of the audio in seconds)
//!
//! Either can fail without affecting the other; a failure only narrows what
//! the lookup query can use. Options can switch a probe off entirely, in which
//! case it reports [`ProbeFailure::NotRequired`] without touching the file.

use async_trait::async_trait;
use lofty::file::{AudioFile as _, TaggedFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey};
use std::io::Cursor;

use crate::config::Options;
use crate::model::{AudioFile, AudioSource, Tags};

/// Why a probe produced no value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeFailure {
    /// The probe was switched off by the options
    #[error("Not required.")]
    NotRequired,

    /// The file could not be read or decoded
    #[error("Unreadable: {0}")]
    Unreadable(String),
}

/// Outcome of a single probe.
pub type ProbeResult<T> = Result<T, ProbeFailure>;

/// Source of embedded metadata and audio durations.
///
/// Production code uses [`LoftyReader`]; tests substitute fixed readers.
#[async_trait]
pub trait TagReader: Send + Sync {
    /// Read the embedded tags of a file.
    async fn read_tags(&self, file: &AudioFile) -> ProbeResult<Tags>;

    /// Read the playback length of a file in seconds.
    async fn read_duration(&self, file: &AudioFile) -> ProbeResult<f64>;
}

/// Run the tag probe, unless filenames are forced.
pub async fn probe_tags(reader: &dyn TagReader, file: &AudioFile, options: &Options) -> ProbeResult<Tags> {
    if options.force_file_name {
        return Err(ProbeFailure::NotRequired);
    }
    reader.read_tags(file).await
}

/// Run the duration probe, unless durations are not sent.
pub async fn probe_duration(reader: &dyn TagReader, file: &AudioFile, options: &Options) -> ProbeResult<f64> {
    if !options.send_duration {
        return Err(ProbeFailure::NotRequired);
    }
    reader.read_duration(file).await
}

/// lofty-backed reader. Parsing runs on the blocking thread pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyReader;

#[async_trait]
impl TagReader for LoftyReader {
    async fn read_tags(&self, file: &AudioFile) -> ProbeResult<Tags> {
        let source = file.source.clone();
        let tagged = tokio::task::spawn_blocking(move || open(&source))
            .await
            .map_err(|e| ProbeFailure::Unreadable(e.to_string()))??;
        extract_tags(&tagged)
    }

    async fn read_duration(&self, file: &AudioFile) -> ProbeResult<f64> {
        let source = file.source.clone();
        let tagged = tokio::task::spawn_blocking(move || open(&source))
            .await
            .map_err(|e| ProbeFailure::Unreadable(e.to_string()))??;

        let secs = tagged.properties().duration().as_secs_f64();
        if secs > 0.0 {
            Ok(secs)
        } else {
            Err(ProbeFailure::Unreadable("no playable duration".to_string()))
        }
    }
}

fn open(source: &AudioSource) -> ProbeResult<TaggedFile> {
    let unreadable = |e: lofty::error::LoftyError| ProbeFailure::Unreadable(e.to_string());
    match source {
        AudioSource::Disk(path) => Probe::open(path)
            .map_err(unreadable)?
            .read()
            .map_err(unreadable),
        AudioSource::Memory(data) => Probe::new(Cursor::new(data.clone()))
            .guess_file_type()
            .map_err(|e| ProbeFailure::Unreadable(e.to_string()))?
            .read()
            .map_err(unreadable),
    }
}

fn extract_tags(tagged: &TaggedFile) -> ProbeResult<Tags> {
    // Get the primary tag, or fall back to the first available tag
    let tag = tagged
        .primary_tag()
        .or_else(|| tagged.first_tag())
        .ok_or_else(|| ProbeFailure::Unreadable("no tags".to_string()))?;

    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    // Album artist (ID3 TPE2) wins over the track artist
    let artist = tag
        .get_string(&ItemKey::AlbumArtist)
        .and_then(non_empty)
        .or_else(|| tag.artist().and_then(|a| non_empty(a.as_ref())));

    Ok(Tags {
        title: tag.title().and_then(|t| non_empty(t.as_ref())),
        artist,
        album: tag.album().and_then(|a| non_empty(a.as_ref())),
    })
}
