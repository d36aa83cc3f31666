//! Key/value persistence for session credentials.
//!
//! Stands in for browser local storage: a flat map of string keys to string
//! values that survives restarts.

use crate::error::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Key under which the bearer token is persisted.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Key under which the user id is persisted.
pub const USER_ID_KEY: &str = "user_id";

/// Trait for persistent key/value backends.
///
/// Single-key calls are individually durable. [`KeyValueStore::set_many`]
/// writes several keys together.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. Returns `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a value. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<()>;

    /// Writes all `entries` or, on failure, leaves them in a state where the
    /// last key is absent or every key holds its previous value.
    ///
    /// Backends that can commit several keys at once should override this.
    /// The provided version removes the last key first and writes it last,
    /// so a partial write never looks like a complete set of new values
    /// mixed with old ones. It then tries to put the previous values back,
    /// again restoring the last key last.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        let Some((last_key, _)) = entries.last() else {
            return Ok(());
        };

        let previous = entries
            .iter()
            .map(|(key, _)| Ok((*key, self.get(key)?)))
            .collect::<Result<Vec<_>>>()?;

        self.remove(last_key)?;

        for (key, value) in entries {
            if let Err(e) = self.set(key, value) {
                for (key, value) in &previous {
                    let restored = match value {
                        Some(value) => self.set(key, value),
                        None => self.remove(key),
                    };
                    if let Err(rollback_err) = restored {
                        tracing::error!(key, "Failed to restore previous value: {}", rollback_err);
                        break;
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }
}

/// In-memory key/value store.
///
/// Does NOT persist across restarts. Useful for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given pairs.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(map),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| crate::JobdeskError::storage(format!("Lock poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| crate::JobdeskError::storage(format!("Lock poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| crate::JobdeskError::storage(format!("Lock poisoned: {}", e)))?;
        entries.remove(key);
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut map = self
            .entries
            .lock()
            .map_err(|e| crate::JobdeskError::storage(format!("Lock poisoned: {}", e)))?;
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}
