//! File-backed key/value store.
//!
//! Persists string pairs to a TOML file (normally `session.toml`):
//!
//! ```toml
//! [entries]
//! access_token = "eyJhbGciOi..."
//! user_id = "42"
//! ```

use super::atomic_toml::AtomicTomlFile;
use jobdesk_core::Result;
use jobdesk_core::session::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct KeyValueFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// [`KeyValueStore`] on top of an owner-only TOML file.
///
/// Every write is a locked read-modify-write of the whole file, so each
/// `set`/`remove` is atomic and `set_many` commits all keys in one rename. Nothing is cached: reads always see
/// what another process last committed.
pub struct FileKeyValueStore {
    file: AtomicTomlFile<KeyValueFile>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::private(path),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.file.load()?.unwrap_or_default().entries)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(KeyValueFile::default(), |data| {
            data.entries.insert(key.to_string(), value.to_string());
            Ok(())
        })?;
        tracing::debug!(key, path = %self.file.path().display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        // Nothing to remove and nothing to create.
        if !self.file.path().exists() {
            return Ok(());
        }
        self.file.update(KeyValueFile::default(), |data| {
            data.entries.remove(key);
            Ok(())
        })?;
        tracing::debug!(key, path = %self.file.path().display(), "removed value");
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        self.file.update(KeyValueFile::default(), |data| {
            for (key, value) in entries {
                data.entries.insert(key.to_string(), value.to_string());
            }
            Ok(())
        })?;
        tracing::debug!(
            keys = entries.len(),
            path = %self.file.path().display(),
            "stored values"
        );
        Ok(())
    }
}
