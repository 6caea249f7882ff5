//! Upload storage for product images
//!
//! Files land in a single directory under `<unix-ms>-<original-name>`.
//! Names are claimed with create-new semantics; if two uploads with the
//! same name arrive in the same millisecond, the later one gets a random
//! token inserted (`<unix-ms>-<uuid>-<original-name>`) instead of
//! overwriting the first.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Name used when the client sends no usable file name
const FALLBACK_NAME: &str = "upload";

/// Errors while writing an uploaded file
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Upload I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A file written to the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Generated file name inside the upload directory
    pub file_name: String,
    /// Server-relative path the file is served at (e.g. `/uploads/<name>`)
    pub url_path: String,
}

/// Writes uploaded files into a directory served as static content
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    url_prefix: String,
}

impl UploadStore {
    /// Create an upload store writing to `dir`, served under `url_prefix`
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    /// Directory files are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory (and parents) if missing
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Store `data` under a unique name derived from `original_name`
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredUpload, UploadError> {
        self.save_at(chrono::Utc::now().timestamp_millis(), original_name, data)
            .await
    }

    async fn save_at(
        &self,
        millis: i64,
        original_name: &str,
        data: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        let original = sanitize_file_name(original_name);

        let primary = format!("{}-{}", millis, original);
        let file_name = match self.write_new(&primary, data).await {
            Ok(()) => primary,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let token = uuid::Uuid::new_v4().simple();
                let fallback = format!("{}-{}-{}", millis, token, original);
                tracing::debug!(taken = %primary, name = %fallback, "Upload name taken, using fallback");
                self.write_new(&fallback, data).await?;
                fallback
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(file_name = %file_name, size = data.len(), "Stored upload");

        Ok(StoredUpload {
            url_path: format!("{}/{}", self.url_prefix, file_name),
            file_name,
        })
    }

    async fn write_new(&self, file_name: &str, data: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.dir.join(file_name))
            .await?;
        file.write_all(data).await?;
        file.flush().await
    }
}

/// Reduce a client-supplied file name to a bare, printable file name
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();

    match cleaned.as_str() {
        "" | "." | ".." => FALLBACK_NAME.to_string(),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("photo.png"), "photo.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\cat.jpg"), "cat.jpg");
        assert_eq!(sanitize_file_name("dir/.."), "upload");
        assert_eq!(sanitize_file_name("   "), "upload");
        assert_eq!(sanitize_file_name("a\u{0}b.png"), "ab.png");
    }

    #[tokio::test]
    async fn test_save_uses_timestamp_and_original_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path(), "/uploads/");

        let stored = store
            .save_at(1_700_000_000_123, "photo.png", b"png-bytes")
            .await
            .unwrap();

        assert_eq!(stored.file_name, "1700000000123-photo.png");
        assert_eq!(stored.url_path, "/uploads/1700000000123-photo.png");

        let written = std::fs::read(dir.path().join(&stored.file_name)).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn test_same_millisecond_uploads_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path(), "/uploads");

        let first = store.save_at(42, "photo.png", b"first").await.unwrap();
        let second = store.save_at(42, "photo.png", b"second").await.unwrap();

        assert_eq!(first.file_name, "42-photo.png");
        assert_ne!(first.file_name, second.file_name);
        assert!(second.file_name.starts_with("42-"));
        assert!(second.file_name.ends_with("-photo.png"));

        assert_eq!(std::fs::read(dir.path().join(&first.file_name)).unwrap(), b"first");
        assert_eq!(std::fs::read(dir.path().join(&second.file_name)).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("public").join("uploads"), "/uploads");

        store.ensure_dir().await.unwrap();
        assert!(store.dir().is_dir());

        store.save("x.txt", b"x").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("missing"), "/uploads");

        assert!(matches!(
            store.save("x.txt", b"x").await,
            Err(UploadError::Io(_))
        ));
    }
}
