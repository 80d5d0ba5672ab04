//! Turns command-line inputs into an ordered batch of [`AudioFile`]s.
//!
//! Directories are walked recursively and every file gets an original path of
//! the form `<folder name>/<relative path>`, the folder name acting as the
//! synthetic root segment that [`crate::paths::resolve`] later discards.
//! Files passed directly carry no original path.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::model::AudioFile;

/// Root segment used when a directory has no usable name (e.g. `/`).
const PLACEHOLDER_ROOT: &str = "TempFolder";

/// Comma-separated suffix filter (`".mp3,.flac"`).
///
/// An empty filter, or one containing an empty entry, admits every file.
#[derive(Debug, Clone, Default)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    pub fn parse(list: &str) -> Self {
        Self {
            suffixes: list.split(',').map(|s| s.trim().to_lowercase()).collect(),
        }
    }

    pub fn allows(&self, path: &str) -> bool {
        if self.suffixes.is_empty() {
            return true;
        }
        let path = path.to_lowercase();
        self.suffixes.iter().any(|suffix| path.ends_with(suffix.as_str()))
    }
}

/// Collect the batch for a set of inputs, preserving argument order.
///
/// Directory entries are sorted by name so repeated runs see the same order.
pub fn collect(inputs: &[PathBuf], filter: &ExtensionFilter) -> Vec<AudioFile> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            collect_dir(input, filter, &mut files);
        } else if input.is_file() {
            files.push(AudioFile::from_disk(input, None));
        } else {
            tracing::warn!("Skipping {:?}: not a file or directory", input);
        }
    }

    tracing::debug!("Collected {} file(s) from {} input(s)", files.len(), inputs.len());
    files
}

fn collect_dir(root: &Path, filter: &ExtensionFilter, out: &mut Vec<AudioFile>) {
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_ROOT.to_string());

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let original = format!("{}/{}", root_name, relative);

        if filter.allows(&original) {
            out.push(AudioFile::from_disk(entry.path(), Some(original)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_filter_parsing() {
        let filter = ExtensionFilter::parse(".mp3, .FLAC");
        assert!(filter.allows("Root/song.mp3"));
        assert!(filter.allows("Root/song.flac"));
        assert!(!filter.allows("Root/cover.jpg"));

        // Empty filter lets everything through
        let filter = ExtensionFilter::parse("");
        assert!(filter.allows("Root/cover.jpg"));
        assert!(ExtensionFilter::default().allows("anything"));
    }

    #[test]
    fn test_collect_directory_builds_rooted_paths() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("Music");
        let sub = root.join("Album");
        fs::create_dir_all(&sub).unwrap();
        File::create(root.join("b.mp3")).unwrap();
        File::create(sub.join("a.mp3")).unwrap();
        File::create(sub.join("a.lrc")).unwrap();
        File::create(sub.join("cover.jpg")).unwrap();

        let files = collect(&[root.clone()], &ExtensionFilter::parse(".mp3,.lrc"));
        let paths: Vec<_> = files
            .iter()
            .map(|f| f.original_path.clone().unwrap())
            .collect();

        assert_eq!(paths, vec!["Music/Album/a.lrc", "Music/Album/a.mp3", "Music/b.mp3"]);
        assert_eq!(files[1].name, "a.mp3");
    }

    #[test]
    fn test_collect_single_file_has_no_original_path() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("song.mp3");
        File::create(&file).unwrap();

        let files = collect(&[file], &ExtensionFilter::parse(".flac"));
        assert_eq!(files.len(), 1);
        assert!(files[0].original_path.is_none());
        assert_eq!(files[0].name, "song.mp3");
    }

    #[test]
    fn test_collect_missing_input_is_skipped() {
        let files = collect(
            &[PathBuf::from("/definitely/not/here")],
            &ExtensionFilter::default(),
        );
        assert!(files.is_empty());
    }
}
