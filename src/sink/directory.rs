//! Live directory tree sink.

use std::path::{Component, Path, PathBuf};

use super::SinkError;

/// Writes artifacts below a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a `/`-separated relative path onto the root.
    ///
    /// Only plain segments are accepted, so nothing can land outside the root.
    fn target(&self, path: &str) -> Result<PathBuf, SinkError> {
        let mut target = self.root.clone();
        for segment in path.split('/') {
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(name)), None) if name == segment => target.push(segment),
                _ => return Err(SinkError::InvalidPath(path.to_string())),
            }
        }
        Ok(target)
    }

    /// Create intermediate folders and write (or overwrite) the file.
    pub async fn write(&self, path: &str, content: &[u8]) -> Result<(), SinkError> {
        let target = self.target(path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SinkError::io(parent, e))?;
        }

        tokio::fs::write(&target, content)
            .await
            .map_err(|e| SinkError::io(&target, e))?;

        tracing::debug!("Wrote {:?}", target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_creates_folders_idempotently() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        sink.write("plain/Album/One.txt", b"one").await.unwrap();
        sink.write("plain/Album/Two.txt", b"two").await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("plain/Album/One.txt")).unwrap(), b"one");
        assert_eq!(std::fs::read(dir.path().join("plain/Album/Two.txt")).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        sink.write("synced/Song.lrc", b"old content that is longer").await.unwrap();
        sink.write("synced/Song.lrc", b"new").await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("synced/Song.lrc")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_escaping_paths_are_rejected() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("out"));

        for bad in ["../evil.txt", "plain/../../evil.txt", "/abs.txt", "plain//x.txt", ""] {
            let result = sink.write(bad, b"x").await;
            assert!(
                matches!(result, Err(SinkError::InvalidPath(_))),
                "{:?} should be rejected",
                bad
            );
        }
        assert!(!dir.path().join("evil.txt").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_backslash_is_part_of_the_name() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());

        sink.write("plain/AC\\DC - Song.txt", b"x").await.unwrap();
        assert_eq!(std::fs::read(dir.path().join("plain").join("AC\\DC - Song.txt")).unwrap(), b"x");
    }

    #[tokio::test]
    async fn test_write_error_propagates() {
        let dir = tempdir().unwrap();
        // A file where a folder is needed
        std::fs::write(dir.path().join("plain"), b"not a dir").unwrap();
        let sink = DirectorySink::new(dir.path());

        let result = sink.write("plain/Song.txt", b"x").await;
        assert!(matches!(result, Err(SinkError::Io { .. })));
    }
}
