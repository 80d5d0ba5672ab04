//! Search query construction.
//!
//! The query depends only on the probe results, the filename and the options,
//! so the same file always produces the same request.

use std::fmt;

use crate::config::Options;
use crate::metadata::ProbeResult;
use crate::model::Tags;
use crate::paths;

/// Parameter names understood by `/api/search`.
const Q: &str = "q";
const TRACK_NAME: &str = "track_name";
const ARTIST_NAME: &str = "artist_name";
const ALBUM_NAME: &str = "album_name";

/// A search query. An empty query means "not enough information, don't ask".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupQuery {
    params: Vec<(&'static str, String)>,
}

impl LookupQuery {
    /// The empty sentinel.
    pub fn none() -> Self {
        Self::default()
    }

    /// A single free-text `q` parameter.
    pub fn free_text(text: impl Into<String>) -> Self {
        Self {
            params: vec![(Q, text.into())],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Percent-encoded `name=value&...` string, in parameter order.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for LookupQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Build the query for one file.
///
/// In order:
/// 1. Tags read, and every field the options require is present: a metadata
///    query. The title falls back to the filename stem. Artist and album are
///    only sent when required by the options and present.
/// 2. Otherwise, if filename fallback is on: a free-text query of the stem.
/// 3. Otherwise: [`LookupQuery::none`].
pub fn build_query(
    tags: &ProbeResult<Tags>,
    duration: &ProbeResult<f64>,
    file_name: &str,
    options: &Options,
) -> LookupQuery {
    let stem = paths::file_stem(file_name);

    if let Ok(tags) = tags {
        let track = tags.title.as_deref().unwrap_or(stem);
        let album_ok = tags.album.is_some() || !options.send_album;
        let artist_ok = tags.artist.is_some() || !options.send_artist;
        let duration_ok = duration.is_ok() || !options.send_duration;

        if album_ok && !track.is_empty() && artist_ok && duration_ok {
            let artist = tags.artist.as_deref().filter(|_| options.send_artist);
            let album = tags.album.as_deref().filter(|_| options.send_album);
            return metadata_query(track, artist, album, options.use_q);
        }
    }

    if options.use_file_name && !stem.is_empty() {
        return LookupQuery::free_text(stem);
    }

    LookupQuery::none()
}

fn metadata_query(track: &str, artist: Option<&str>, album: Option<&str>, use_q: bool) -> LookupQuery {
    if use_q {
        let text = [Some(track), artist, album]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        return LookupQuery::free_text(text);
    }

    let mut params = vec![(TRACK_NAME, track.to_string())];
    if let Some(artist) = artist {
        params.push((ARTIST_NAME, artist.to_string()));
    }
    if let Some(album) = album {
        params.push((ALBUM_NAME, album.to_string()));
    }
    LookupQuery { params }
}
