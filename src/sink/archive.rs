//! In-memory zip archive.

use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use super::SinkError;

/// Path-to-content entries, serialized to a zip on demand.
///
/// Entries keep their first insertion position; re-adding a path replaces its content.
#[derive(Debug, Default)]
pub struct ArchiveSink {
    entries: Vec<(String, Vec<u8>)>,
}

impl ArchiveSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn add(&mut self, path: &str, content: &[u8]) {
        match self.entries.iter_mut().find(|(p, _)| p == path) {
            Some((_, existing)) => *existing = content.to_vec(),
            None => self.entries.push((path.to_string(), content.to_vec())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize all entries into zip bytes (deflate).
    pub fn into_zip(self) -> Result<Vec<u8>, SinkError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (path, content) in &self.entries {
            writer.start_file(path.as_str(), options)?;
            writer
                .write_all(content)
                .map_err(|e| SinkError::io(path.as_str(), e))?;
        }

        Ok(writer.finish()?.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_last_write_wins() {
        let mut archive = ArchiveSink::new();
        archive.add("plain/Song.txt", b"first");
        archive.add("plain/Other.txt", b"other");
        archive.add("plain/Song.txt", b"second");
        assert_eq!(archive.len(), 2);

        let bytes = archive.into_zip().unwrap();
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(zip.len(), 2);

        let mut content = String::new();
        zip.by_name("plain/Song.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn test_empty_archive_is_valid_zip() {
        let archive = ArchiveSink::new();
        assert!(archive.is_empty());
        let bytes = archive.into_zip().unwrap();
        let zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(zip.len(), 0);
    }
}
