use async_trait::async_trait;

use crate::errors::CoreError;

/// Key-value blob store the ledger snapshot is persisted to.
///
/// Mirrors the string key-value storage offered by mobile and web platforms.
/// Hosts plug in their own backend; [`MemoryBlobStore`](super::memory::MemoryBlobStore)
/// and [`FileBlobStore`](super::file::FileBlobStore) ship with the crate.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Human-readable name of this backend (for logs).
    fn name(&self) -> &str;

    /// Read the value stored under `key`, or `None` if nothing is stored.
    async fn get_item(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), CoreError>;
}
