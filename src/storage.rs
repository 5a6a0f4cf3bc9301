//! Key/value storage capability
//!
//! The geolocation provider persists its coordinate fix, permission flag,
//! and capture timestamp through this trait rather than touching a store
//! directly, so tests can substitute an in-memory implementation.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use fjall::Keyspace;
use serde::{Serialize, de::DeserializeOwned};
use tokio::task;

use crate::error::GompaError;
use crate::Result;

/// Durable (or test-local) key/value storage.
///
/// Values are encoded with postcard; the typed helpers cover every use in
/// this crate, `put_raw`/`get_raw` are the implementation surface.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn put_raw(&self, key: &str, value: Vec<u8>) -> Result<()>;

    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn remove(&self, key: &str) -> Result<()>;

    /// Stores a serializable value under `key`.
    async fn put<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let bytes = postcard::to_stdvec(value)
            .map_err(|e| GompaError::storage(format!("failed to encode '{key}': {e}")))?;
        self.put_raw(key, bytes).await
    }

    /// Retrieves a value if present, decoding it as `T`.
    async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.get_raw(key).await? {
            Some(bytes) => {
                let value = postcard::from_bytes(&bytes)
                    .map_err(|e| GompaError::storage(format!("failed to decode '{key}': {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

/// In-memory store used by tests and the demo binary
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries; handy for asserting a clean store
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("store lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn put_raw(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .entries
            .lock()
            .expect("store lock poisoned")
            .get(key)
            .cloned())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .remove(key);
        Ok(())
    }
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    async fn put_raw(&self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).put_raw(key, value).await
    }

    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get_raw(key).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key).await
    }
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    let value = store
        .get(key)
        .map_err(|e| GompaError::storage(e.to_string()))?;
    Ok(value.map(|v| v.to_vec()))
}

/// Persistent store backed by an fjall keyspace
pub struct PersistentStore {
    store: Keyspace,
}

impl PersistentStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path)
            .open()
            .map_err(|e| GompaError::storage(format!("failed to open store: {e}")))?;
        let items = db
            .keyspace("state", fjall::KeyspaceCreateOptions::default)
            .map_err(|e| GompaError::storage(format!("failed to open keyspace: {e}")))?;
        Ok(PersistentStore { store: items })
    }
}

#[async_trait]
impl KeyValueStore for PersistentStore {
    #[tracing::instrument(name = "store_put", level = "debug", skip(self, value))]
    async fn put_raw(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        task::spawn_blocking(move || {
            store
                .insert(key, value)
                .map_err(|e| GompaError::storage(e.to_string()))
        })
        .await
        .map_err(|e| GompaError::storage(format!("store task failed: {e}")))?
    }

    #[tracing::instrument(name = "store_get", level = "debug", skip(self))]
    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();
        task::spawn_blocking(move || get_from_store(store, key_bytes))
            .await
            .map_err(|e| GompaError::storage(format!("store task failed: {e}")))?
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        task::spawn_blocking(move || {
            store
                .remove(key)
                .map_err(|e| GompaError::storage(e.to_string()))
        })
        .await
        .map_err(|e| GompaError::storage(format!("store task failed: {e}")))?
    }
}
