//! Local key-value storage
//!
//! Persisted state (recent locations, last location) goes through the
//! [`KeyValueStore`] trait. [`FjallStore`] keeps it on disk; [`MemoryStore`]
//! keeps it in memory for tests and for running without a data directory.

pub mod recents;

use crate::{Result, RideError};
use async_trait::async_trait;
use fjall::Keyspace;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tokio::task;

pub use recents::{LastLocationStore, MAX_RECENTS, RecentsStore};

/// Raw byte storage keyed by string
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Read and decode a stored value
pub async fn get_value<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(bytes) => Ok(Some(postcard::from_bytes(&bytes)?)),
        None => Ok(None),
    }
}

/// Encode and store a value
pub async fn put_value<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let bytes = postcard::to_stdvec(value)?;
    store.put(key, bytes).await
}

/// Persistent store backed by a fjall keyspace
pub struct FjallStore {
    store: Keyspace,
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

impl FjallStore {
    /// Open (or create) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let items = db.keyspace("ridecast", fjall::KeyspaceCreateOptions::default)?;
        Ok(FjallStore { store: items })
    }
}

fn join_error(err: task::JoinError) -> RideError {
    RideError::storage(format!("storage task failed: {err}"))
}

#[async_trait]
impl KeyValueStore for FjallStore {
    #[tracing::instrument(name = "store_get", level = "debug", skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        task::spawn_blocking(move || get_from_store(store, key))
            .await
            .map_err(join_error)?
    }

    #[tracing::instrument(name = "store_put", level = "debug", skip(self, value))]
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        task::spawn_blocking(move || store.insert(key, value))
            .await
            .map_err(join_error)??;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        task::spawn_blocking(move || store.remove(key))
            .await
            .map_err(join_error)??;
        Ok(())
    }
}

/// In-memory store; contents are lost when dropped
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut HashMap<String, Vec<u8>>) -> R) -> Result<R> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| RideError::storage("memory store lock poisoned"))?;
        Ok(f(&mut entries))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}
