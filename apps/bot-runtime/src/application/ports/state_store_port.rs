//! State Store Port (Driven Port)
//!
//! Key-value persistence for strategy state. The runtime itself stores
//! nothing here; it exists for bots that need memory across ticks.

use async_trait::async_trait;

/// State store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StateStoreError {
    /// Backend failure.
    #[error("State store backend error: {message}")]
    Backend {
        /// Error details.
        message: String,
    },

    /// Value could not be encoded or decoded.
    #[error("State serialization failed: {message}")]
    Serialization {
        /// Error details.
        message: String,
    },
}

impl From<serde_json::Error> for StateStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Port for strategy key-value state.
///
/// This is a driven (secondary/outbound) port. Values are JSON so any
/// backend can hold them.
#[async_trait]
pub trait StateStorePort: Send + Sync {
    /// Read a value.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StateStoreError>;

    /// Write a value, replacing any existing one.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StateStoreError>;

    /// Remove a value. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StateStoreError>;
}

/// In-memory state store.
///
/// The default store in fresh contexts. State lives for the life of the
/// process only.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    entries: parking_lot::RwLock<std::collections::HashMap<String, serde_json::Value>>,
}

impl InMemoryStateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Remove all keys.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[async_trait]
impl StateStorePort for InMemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StateStoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StateStoreError> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StateStoreError> {
        self.entries.write().remove(key);
        Ok(())
    }
}
