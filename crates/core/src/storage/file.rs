use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::errors::CoreError;

use super::blob::BlobStore;

/// Directory-backed blob store: one `<encoded key>.json` file per key.
///
/// Writes go to a temporary file that is then renamed over the target.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Use `root` as the storage directory. It is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    ///
    /// Keys such as `@DailyExpenses:data` contain characters that are not
    /// portable in file names; anything outside `[A-Za-z0-9_-]` is hex-escaped.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len() + 5);
        for b in key.bytes() {
            if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
                name.push(b as char);
            } else {
                name.push_str(&format!("%{b:02X}"));
            }
        }
        name.push_str(".json");
        self.root.join(name)
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            CoreError::FileIO(format!(
                "Failed to create storage directory '{}': {e}",
                self.root.display()
            ))
        })?;

        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).await.map_err(|e| {
            CoreError::FileIO(format!("Failed to write temp file '{}': {e}", tmp.display()))
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            CoreError::FileIO(format!(
                "Failed to rename temp file '{}' -> '{}': {e}",
                tmp.display(),
                path.display()
            ))
        })?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), CoreError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
