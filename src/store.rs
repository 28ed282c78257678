//! State store capability consumed by the ledger handlers

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Atomic per-key get/put provided by the host ledger
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read a value; `None` means the key was never written
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Write a value, replacing any previous one
    async fn put(&self, key: &str, value: Bytes) -> Result<()>;
}

/// In-process store used by the binary and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Bytes>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<()> {
        self.records.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_put_overwrites() {
        let store = MemoryStore::new();
        store.put("k", Bytes::from_static(b"a")).await.unwrap();
        store.put("k", Bytes::from_static(b"b")).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some(Bytes::from_static(b"b")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_absent_vs_empty() {
        let store = MemoryStore::new();
        store.put("empty", Bytes::new()).await.unwrap();

        assert_eq!(store.get("empty").await.unwrap(), Some(Bytes::new()));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }
}
