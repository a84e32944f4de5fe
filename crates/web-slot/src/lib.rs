//! Web Slot Storage
//!
//! Named key-value slots for browser apps. A slot holds one string value.
//! `BrowserStorage` wraps `window.localStorage`; `MemoryStorage` keeps slots
//! in a shared map and backs native tests and the in-memory build.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Slot storage errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No storage in this environment (no window, storage disabled by the browser)
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to read slot `{key}`: {reason}")]
    Read { key: String, reason: String },
    /// Includes quota exceeded
    #[error("failed to write slot `{key}`: {reason}")]
    Write { key: String, reason: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A per-origin key-value store holding string values
pub trait KeyValueStore: Send + Sync {
    /// Read a slot, `None` when it has never been written
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite a slot unconditionally
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a slot; removing a missing slot is not an error
    fn remove(&self, key: &str) -> StorageResult<()>;
}

// ========================
// Browser localStorage
// ========================

/// `window.localStorage`
///
/// Holds no handle: the storage object is looked up on every call, so the
/// type stays `Send + Sync` and can live inside reactive signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> StorageResult<web_sys::Storage> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .ok()
            .flatten()
            .ok_or(StorageError::Unavailable)
    }

    /// Whether localStorage can be reached at all
    pub fn is_available() -> bool {
        Self::storage().is_ok()
    }
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Self::storage()?.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: describe(e),
        })
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::storage()?.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: describe(e),
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        Self::storage()?.remove_item(key).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: describe(e),
        })
    }
}

// ========================
// In-memory storage
// ========================

#[derive(Debug, Default)]
struct MemoryState {
    slots: HashMap<String, String>,
    /// Max total bytes of keys + values, like the browser's per-origin quota
    quota: Option<usize>,
    /// Every call fails, like a browser with storage disabled
    unavailable: bool,
}

impl MemoryState {
    fn used_without(&self, key: &str) -> usize {
        self.slots
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

/// In-memory slots; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes once keys + values exceed `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        let storage = Self::default();
        storage.lock().quota = Some(bytes);
        storage
    }

    /// Storage whose every call fails with `StorageError::Unavailable`
    pub fn unavailable() -> Self {
        let storage = Self::default();
        storage.lock().unavailable = true;
        storage
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A panic while holding the lock cannot leave the map half-written.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of slots currently stored
    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let state = self.lock();
        if state.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(state.slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut state = self.lock();
        if state.unavailable {
            return Err(StorageError::Unavailable);
        }
        if let Some(quota) = state.quota {
            let needed = state.used_without(key) + key.len() + value.len();
            if needed > quota {
                log::debug!("[STORAGE] quota exceeded for `{}`: {} > {}", key, needed, quota);
                return Err(StorageError::Write {
                    key: key.to_string(),
                    reason: format!("quota exceeded ({} > {} bytes)", needed, quota),
                });
            }
        }
        state.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut state = self.lock();
        if state.unavailable {
            return Err(StorageError::Unavailable);
        }
        state.slots.remove(key);
        Ok(())
    }
}
