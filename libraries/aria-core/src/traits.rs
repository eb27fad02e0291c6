/// Core traits for Aria
use crate::error::Result;
use async_trait::async_trait;

/// Durable string storage
///
/// Values are opaque blobs (JSON in practice). Implementations must make a
/// completed `set` visible to every later `get` on the same store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write or overwrite a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
