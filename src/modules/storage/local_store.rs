//! Local disk storage for uploaded product images
//!
//! Files are written into a single directory and keyed by upload time
//! (unix milliseconds) plus the original extension. The directory is served
//! statically under a public URL prefix, which is what gets persisted.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::config::UploadConfig;
use crate::core::error::AppError;

/// Give up after this many consecutive key collisions
const MAX_KEY_ATTEMPTS: i64 = 64;

/// A file written by [`LocalImageStore::save`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// File name inside the upload directory
    pub file_name: String,
    /// Public path, e.g. `/uploads/1717171717171.png`
    pub public_path: String,
}

pub struct LocalImageStore {
    dir: PathBuf,
    url_prefix: String,
}

impl LocalImageStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            url_prefix: config.url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).await?;
        info!("Upload directory ready: {}", self.dir.display());
        Ok(())
    }

    /// Public path for a stored file name
    pub fn public_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.url_prefix, file_name)
    }

    /// Write image bytes under a fresh timestamp key
    ///
    /// # Arguments
    /// * `data` - The file content as bytes
    /// * `extension` - Extension including the leading dot (e.g. ".png"), may be empty
    ///
    /// # Returns
    /// The stored file name and its public path
    pub async fn save(&self, data: &[u8], extension: &str) -> Result<StoredImage, AppError> {
        let mut key = Utc::now().timestamp_millis();

        for _ in 0..MAX_KEY_ATTEMPTS {
            let file_name = format!("{}{}", key, extension);
            let path = self.dir.join(&file_name);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("Upload key {} taken, trying next", file_name);
                    key += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if let Err(e) = file.write_all(data).await {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(e.into());
            }
            file.flush().await?;

            debug!("Stored upload {} ({} bytes)", path.display(), data.len());
            return Ok(StoredImage {
                public_path: self.public_path(&file_name),
                file_name,
            });
        }

        Err(AppError::Internal(format!(
            "Could not allocate an upload key after {} attempts",
            MAX_KEY_ATTEMPTS
        )))
    }

    /// Remove a previously stored file by its public path
    ///
    /// Paths outside this store's prefix, and files that are already gone,
    /// are ignored.
    pub async fn remove(&self, public_path: &str) {
        let Some(file_name) = self.file_name_for(public_path) else {
            return;
        };

        match fs::remove_file(self.dir.join(file_name)).await {
            Ok(()) => debug!("Removed upload {}", public_path),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove upload {}: {}", public_path, e),
        }
    }

    /// File name for a public path, only if it is a plain file under our prefix
    fn file_name_for<'a>(&self, public_path: &'a str) -> Option<&'a str> {
        let file_name = public_path
            .strip_prefix(self.url_prefix.as_str())?
            .strip_prefix('/')?;

        let is_plain = !file_name.is_empty()
            && !file_name.contains(['/', '\\'])
            && file_name != "."
            && file_name != "..";
        is_plain.then_some(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> LocalImageStore {
        LocalImageStore::new(&UploadConfig {
            dir: dir.to_path_buf(),
            url_prefix: "/uploads/".to_string(),
            max_file_size: UploadConfig::DEFAULT_MAX_FILE_SIZE,
        })
    }

    #[tokio::test]
    async fn test_save_writes_timestamp_keyed_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());

        let stored = store.save(b"png-bytes", ".png").await.unwrap();

        assert!(stored.file_name.ends_with(".png"));
        let stem = stored.file_name.trim_end_matches(".png");
        assert!(stem.parse::<i64>().is_ok());
        assert_eq!(stored.public_path, format!("/uploads/{}", stored.file_name));

        let on_disk = std::fs::read(tmp.path().join(&stored.file_name)).unwrap();
        assert_eq!(on_disk, b"png-bytes");
    }

    #[tokio::test]
    async fn test_save_never_overwrites_existing_key() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());

        let first = store.save(b"one", ".jpg").await.unwrap();
        let second = store.save(b"two", ".jpg").await.unwrap();

        assert_ne!(first.file_name, second.file_name);
        assert_eq!(std::fs::read(tmp.path().join(&first.file_name)).unwrap(), b"one");
        assert_eq!(std::fs::read(tmp.path().join(&second.file_name)).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_remove_deletes_only_own_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        let stored = store.save(b"bytes", ".png").await.unwrap();

        store.remove("/elsewhere/file.png").await;
        store.remove("/uploads/../secret").await;
        assert!(tmp.path().join(&stored.file_name).exists());

        store.remove(&stored.public_path).await;
        assert!(!tmp.path().join(&stored.file_name).exists());

        // already gone
        store.remove(&stored.public_path).await;
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp.path().join("a/b"));

        store.ensure_dir().await.unwrap();
        assert!(store.dir().is_dir());
    }
}
