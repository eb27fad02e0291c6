//! In-memory key-value store
//!
//! Used by tests and by callers that want playback without durable state.

use aria_core::{error::Result, KeyValueStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local key-value store
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_entries() {
        let store = MemoryKeyValueStore::new();
        let other = store.clone();

        store.set("a", "1").await.unwrap();
        assert_eq!(other.get("a").await.unwrap().as_deref(), Some("1"));

        other.remove("a").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn remove_missing_key_is_ok() {
        let store = MemoryKeyValueStore::new();
        assert!(store.remove("missing").await.is_ok());
        assert_eq!(store.len().await, 0);
    }
}
