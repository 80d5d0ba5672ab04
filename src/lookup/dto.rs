//! LRCLIB API Data Transfer Objects
//!
//! API Reference: https://lrclib.net/docs
//!
//! The `/api/search` endpoint returns a JSON array of these records. Fields we
//! don't model are kept in `extra`. The `.json` artifact is the response body
//! as received, carried next to the parsed records in [`SearchResponse`].

use serde::{Deserialize, Serialize};

/// One search result
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsRecord {
    /// LRCLIB record ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,
    /// Track length in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrumental: Option<bool>,
    /// Unsynchronized lyrics text
    #[serde(default)]
    pub plain_lyrics: Option<String>,
    /// LRC formatted lyrics
    #[serde(default)]
    pub synced_lyrics: Option<String>,
    /// Everything else the API sent
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A successful search: the body as the service sent it, and its records.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub body: String,
    pub records: Vec<LyricsRecord>,
}

impl SearchResponse {
    /// Parse a search response body, keeping the text untouched.
    pub fn parse(body: impl Into<String>) -> Result<Self, serde_json::Error> {
        let body = body.into();
        let records = serde_json::from_str(&body)?;
        Ok(Self { body, records })
    }
}

impl LyricsRecord {
    /// Plain lyrics, if present and non-empty.
    pub fn plain(&self) -> Option<&str> {
        self.plain_lyrics.as_deref().filter(|s| !s.is_empty())
    }

    /// Synced lyrics, if present and non-empty.
    pub fn synced(&self) -> Option<&str> {
        self.synced_lyrics.as_deref().filter(|s| !s.is_empty())
    }

    /// Whether the record carries any lyric body at all.
    pub fn has_lyrics(&self) -> bool {
        self.plain().is_some() || self.synced().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "id": 3396226,
            "trackName": "I Want to Live",
            "artistName": "Borislav Slavov",
            "albumName": "Baldur's Gate 3 (Original Game Soundtrack)",
            "duration": 233,
            "instrumental": false,
            "plainLyrics": "I feel your breath upon my neck",
            "syncedLyrics": "[00:17.12] I feel your breath upon my neck",
            "name": "I Want to Live"
        },
        {
            "id": 1,
            "duration": 120.5,
            "plainLyrics": null,
            "syncedLyrics": null
        }
    ]"#;

    #[test]
    fn test_parse_search_response() {
        let records: Vec<LyricsRecord> = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].duration, Some(233.0));
        assert_eq!(records[0].track_name.as_deref(), Some("I Want to Live"));
        assert!(records[0].has_lyrics());
        assert_eq!(records[1].duration, Some(120.5));
        assert!(!records[1].has_lyrics());
    }

    #[test]
    fn test_unknown_fields_survive_reserialization() {
        let records: Vec<LyricsRecord> = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(
            records[0].extra.get("name").and_then(|v| v.as_str()),
            Some("I Want to Live")
        );

        let json = serde_json::to_string(&records).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "I Want to Live");
        assert_eq!(value[0]["albumName"], "Baldur's Gate 3 (Original Game Soundtrack)");
        assert!(value[1]["plainLyrics"].is_null());
    }

    #[test]
    fn test_response_keeps_body_verbatim() {
        let body = r#"[{"id":1,"trackName":"S","duration":233,"plainLyrics":"x","syncedLyrics":null}]"#;
        let response = SearchResponse::parse(body).unwrap();
        assert_eq!(response.body, body);
        assert_eq!(response.records[0].duration, Some(233.0));
        assert!(SearchResponse::parse("{").is_err());
    }

    #[test]
    fn test_empty_strings_are_not_lyrics() {
        let record = LyricsRecord {
            plain_lyrics: Some(String::new()),
            synced_lyrics: Some(String::new()),
            ..Default::default()
        };
        assert!(!record.has_lyrics());
        assert_eq!(record.plain(), None);
    }
}
