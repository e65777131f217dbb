//! Local durable cache trait.

use async_trait::async_trait;

use crate::error::PrefsError;

/// Backend trait for the durable local preference cache.
///
/// Implementations handle raw byte storage; the store layers bincode on
/// top. The cache keeps preferences available offline and gives `load()`
/// an immediate value before the remote fetch resolves.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Get raw bytes for a key.
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, PrefsError>;

    /// Set raw bytes for a key.
    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), PrefsError>;

    /// Delete a key.
    async fn delete(&self, key: &str) -> Result<(), PrefsError>;
}
