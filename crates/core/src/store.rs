//! Key-value store port.
//!
//! The cart is persisted as a single serialized string under one key. The
//! storefront backs this with the browser's session; tests and tools use
//! [`InMemoryStore`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Errors raised by a key-value store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed to read or write.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A value could not be serialized before writing.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value store with get/set-by-key semantics.
///
/// Futures are `Send` so implementations can be driven from axum handlers on
/// a multi-threaded runtime.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key is unset.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// In-process store backed by a shared `HashMap`.
///
/// Clones share the same map, so a test can hand one clone to a view-model
/// and inspect the other. Every successful `set` is counted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<InMemoryInner>>,
}

#[derive(Debug, Default)]
struct InMemoryInner {
    values: HashMap<String, String>,
    writes: usize,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one pre-populated entry.
    #[must_use]
    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.lock().values.insert(key.to_owned(), value.into());
        store
    }

    /// Current value under `key`, without going through the async port.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock().values.get(key).cloned()
    }

    /// Number of successful writes since creation.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.values.insert(key.to_owned(), value);
        inner.writes += 1;
        Ok(())
    }
}
