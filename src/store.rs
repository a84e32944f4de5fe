//! Todo Store
//!
//! Owns the ordered list and every operation on it. Each mutation writes the
//! whole list back to the storage slot (when there is one) before returning.
//! Items are always addressed by id.

use chrono::Utc;
use web_slot::{BrowserStorage, KeyValueStore};

use crate::config::{AppConfig, Persistence};
use crate::domain::{Status, Todo, TodoError, TodoId, TodoResult};
use crate::persistence::{self, PersistError};

pub struct TodoStore {
    /// Insertion order, which is also storage order
    items: Vec<Todo>,
    /// `None` for the in-memory variant
    backend: Option<Box<dyn KeyValueStore>>,
    storage_key: String,
    /// Highest id handed out by `add`, so deleted ids are never reissued
    last_id: TodoId,
}

impl TodoStore {
    /// Seed list, never persisted
    pub fn in_memory() -> Self {
        Self {
            items: persistence::seed_todos(),
            backend: None,
            storage_key: String::new(),
            last_id: 0,
        }
    }

    /// Load from `key` in `backend`, seeding the slot when it is empty
    pub fn open(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let storage_key = key.into();
        let loaded = persistence::load_or_seed(backend.as_ref(), &storage_key);
        log::info!("[STORE] opened `{}` with {} items ({:?})", storage_key, loaded.items.len(), loaded.source);
        Self {
            items: loaded.items,
            backend: Some(backend),
            storage_key,
            last_id: 0,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        match config.persistence {
            Persistence::LocalStorage => {
                if !BrowserStorage::is_available() {
                    log::warn!("[STORE] localStorage unavailable, changes will not survive a reload");
                }
                Self::open(Box::new(BrowserStorage), config.storage_key.clone())
            }
            Persistence::Memory => Self::in_memory(),
        }
    }

    // ========================
    // Queries
    // ========================

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    /// Items whose title, or non-empty memo, contains `query` ignoring case.
    /// Keeps list order; an empty query returns everything.
    pub fn filter(&self, query: &str) -> Vec<Todo> {
        let needle = query.to_lowercase();
        self.items.iter().filter(|t| t.matches(&needle)).cloned().collect()
    }

    // ========================
    // Mutations
    // ========================

    /// Append a new item titled `raw` trimmed. Blank input is ignored.
    pub fn add(&mut self, raw: &str) -> Option<TodoId> {
        let title = raw.trim();
        if title.is_empty() {
            return None;
        }
        let id = self.next_id();
        self.items.push(Todo::new(id, title));
        log::debug!("[STORE] added {} {:?}", id, title);
        self.save();
        Some(id)
    }

    /// Flip `done`, returning the new value
    pub fn toggle_done(&mut self, id: TodoId) -> TodoResult<bool> {
        let todo = self.find_mut(id)?;
        todo.done = !todo.done;
        let done = todo.done;
        self.save();
        Ok(done)
    }

    pub fn set_status(&mut self, id: TodoId, status: Status) -> TodoResult<()> {
        self.find_mut(id)?.status = status;
        self.save();
        Ok(())
    }

    /// Remove by id, returning the removed item
    pub fn delete(&mut self, id: TodoId) -> TodoResult<Todo> {
        let index = self
            .items
            .iter()
            .position(|t| t.id == id)
            .ok_or(TodoError::NotFound(id))?;
        let removed = self.items.remove(index);
        log::debug!("[STORE] deleted {} {:?}", id, removed.title);
        self.save();
        Ok(removed)
    }

    /// Replace the memo verbatim
    pub fn edit_memo(&mut self, id: TodoId, memo: impl Into<String>) -> TodoResult<()> {
        self.find_mut(id)?.memo = memo.into();
        self.save();
        Ok(())
    }

    // ========================
    // Persistence
    // ========================

    /// Write the whole list to the slot. No-op without a backend.
    pub fn persist(&self) -> Result<(), PersistError> {
        match &self.backend {
            Some(backend) => persistence::save(backend.as_ref(), &self.storage_key, &self.items),
            None => Ok(()),
        }
    }

    /// Persist after a mutation. A failed write keeps the in-memory change.
    fn save(&self) {
        if let Err(e) = self.persist() {
            log::error!("[STORE] failed to save {} items to `{}`: {}", self.items.len(), self.storage_key, e);
        }
    }

    fn find_mut(&mut self, id: TodoId) -> TodoResult<&mut Todo> {
        self.items
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TodoError::NotFound(id))
    }

    /// Current epoch millis, bumped past every id seen so far
    fn next_id(&mut self) -> TodoId {
        let now = TodoId::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let floor = self
            .items
            .iter()
            .map(|t| t.id)
            .max()
            .unwrap_or(0)
            .max(self.last_id)
            .saturating_add(1);
        self.last_id = now.max(floor);
        self.last_id
    }
}
