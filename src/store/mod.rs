//! Durable key-value storage for the script collection and the settings
//!
//! Values are JSON text. Reads never fail: a missing or corrupt value
//! yields the caller's default. Writes never fail either: errors are logged
//! and the in-memory copy held by the caller stays authoritative.

mod backend;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

pub use backend::{Backend, FileBackend, MemoryBackend};

/// Prefix shared by every key so unrelated data in the same storage area
/// cannot collide with ours
pub const KEY_PREFIX: &str = "teleprompter-";

pub const SCRIPTS_KEY: &str = "scripts";
pub const SETTINGS_KEY: &str = "settings";

/// Handle to the persisted store. Cloning is cheap and every clone talks to
/// the same backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Backend>,
}

impl Store {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// In-memory store, used by tests and as the fallback when the data
    /// directory cannot be determined
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    fn namespaced(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let key = Self::namespaced(key);
        let raw = match self.backend.read(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!(%key, error = %e, "failed to read stored value, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(%key, error = %e, "stored value is corrupt, using default");
                default
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let key = Self::namespaced(key);
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(%key, error = %e, "failed to serialize value, not persisted");
                return;
            }
        };

        match self.backend.write(&key, &raw) {
            Ok(()) => debug!(%key, bytes = raw.len(), "persisted"),
            Err(e) => warn!(%key, error = %e, "failed to persist value"),
        }
    }
}
