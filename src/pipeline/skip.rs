//! "Lyrics already present" check.

use std::collections::HashSet;

use crate::config::Options;
use crate::model::AudioFile;
use crate::paths;

const LRC_SUFFIX: &str = ".lrc";

/// The `.lrc` files of a batch, indexed for the skip check.
#[derive(Debug, Default)]
pub struct LrcIndex {
    enabled: bool,
    anywhere: bool,
    /// Stems of `.lrc` names (`Song`)
    stems: HashSet<String>,
    /// Resolved paths of `.lrc` files (`Sub/Song`)
    paths: HashSet<String>,
}

impl LrcIndex {
    /// Index the batch. With `check_lrc` off the index never skips anything.
    pub fn build(files: &[AudioFile], options: &Options) -> Self {
        if !options.check_lrc {
            return Self::default();
        }

        let lyrics = files.iter().filter(|f| f.name.ends_with(LRC_SUFFIX));
        let mut index = Self {
            enabled: true,
            anywhere: options.check_only_lrc_file_name,
            ..Self::default()
        };
        for file in lyrics {
            index.stems.insert(paths::file_stem(&file.name).to_string());
            index.paths.insert(paths::resolve(file));
        }
        index
    }

    /// Whether `file` already has lyrics in the batch.
    ///
    /// By name anywhere in the batch, or by resolved path (same folder).
    pub fn covers(&self, file: &AudioFile) -> bool {
        if !self.enabled {
            return false;
        }
        if self.anywhere {
            self.stems.contains(paths::file_stem(&file.name))
        } else {
            self.paths.contains(&paths::resolve(file))
        }
    }
}
