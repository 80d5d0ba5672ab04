//! Relative path handling for batch files.
//!
//! Every file in a batch is addressed by a folder-qualified, extension-less
//! identifier. The same identifier drives the "lyrics already present" check and
//! the output layout (`json/<id>.json`, `plain/<id>.txt`, `synced/<id>.lrc`).
//!
//! Original paths always start with a synthetic root segment (the name of the
//! scanned folder, or a placeholder) which is dropped here.

use crate::model::AudioFile;

/// Fallback root name used when the batch has no folder structure.
const DEFAULT_ROOT: &str = "files";

/// Derive the relative identifier of a file.
///
/// - no original path: the display name without its extension
/// - otherwise: the original path without its extension and without its first segment
///
/// ```ignore
/// "Root/Sub/Song.mp3" -> "Sub/Song"
/// "Song.mp3" (no path) -> "Song"
/// ```
pub fn resolve(file: &AudioFile) -> String {
    let path = match file.original_path.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return file_stem(&file.name).to_string(),
    };

    let without_ext = strip_extension(path);
    match without_ext.find('/') {
        Some(idx) => without_ext[idx + 1..].to_string(),
        None => without_ext.to_string(),
    }
}

/// The file name up to its last `.`; names without a dot are returned whole.
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Remove the extension from the last segment of a `/`-separated path.
fn strip_extension(path: &str) -> &str {
    let leaf_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[leaf_start..].rfind('.') {
        Some(idx) => &path[..leaf_start + idx],
        None => path,
    }
}

/// The last segment of a relative identifier (`Sub/Song` -> `Song`).
pub fn leaf(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Infer the batch's root folder name from its first file.
///
/// Used to name the error log and the archive bundle.
pub fn batch_root(files: &[AudioFile]) -> String {
    files
        .first()
        .and_then(|f| f.original_path.as_deref())
        .and_then(|p| p.split_once('/'))
        .map(|(root, _)| root)
        .filter(|root| !root.is_empty())
        .unwrap_or(DEFAULT_ROOT)
        .to_string()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        prop::string::string_regex("[A-Za-z0-9 _-]{1,20}").unwrap()
    }

    proptest! {
        /// The synthetic root never leaks into the resolved identifier
        #[test]
        fn resolve_strips_root(
            root in segment(),
            dirs in prop::collection::vec(segment(), 0..4),
            stem in segment(),
            ext in prop::sample::select(vec!["mp3", "flac", "ogg", "m4a"]),
        ) {
            let mut parts = vec![root];
            parts.extend(dirs.iter().cloned());
            parts.push(format!("{}.{}", stem, ext));
            let original = parts.join("/");
            let name = format!("{}.{}", stem, ext);

            let resolved = resolve(&AudioFile::from_bytes(name, Vec::<u8>::new(), Some(original)));

            let mut expected = dirs.clone();
            expected.push(stem);
            prop_assert_eq!(resolved, expected.join("/"));
        }
    }
}
