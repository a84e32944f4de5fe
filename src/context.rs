//! Application Context
//!
//! Shared state provided via Leptos Context API. Components call these
//! methods with an item id; the store does the work.

use leptos::prelude::*;

use crate::config::DisplayOrder;
use crate::domain::{Status, Todo, TodoId, TodoResult};
use crate::store::TodoStore;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct TodoContext {
    /// The list and its storage slot
    pub store: RwSignal<TodoStore>,
    /// Search box text
    pub query: RwSignal<String>,
    pub display_order: DisplayOrder,
}

impl TodoContext {
    pub fn new(store: TodoStore, display_order: DisplayOrder) -> Self {
        Self {
            store: RwSignal::new(store),
            query: RwSignal::new(String::new()),
            display_order,
        }
    }

    /// Rows to render: filtered by the search query, in display order
    pub fn visible(&self) -> Vec<Todo> {
        let query = self.query.get();
        self.display_order.arrange(self.store.with(|s| s.filter(&query)))
    }

    pub fn total(&self) -> usize {
        self.store.with(|s| s.items().len())
    }

    /// Add an item; false when the input was blank
    pub fn add(&self, raw: &str) -> bool {
        self.store.try_update(|s| s.add(raw)).flatten().is_some()
    }

    pub fn toggle(&self, id: TodoId) {
        skipped("toggle", id, self.store.try_update(|s| s.toggle_done(id)));
    }

    pub fn delete(&self, id: TodoId) {
        skipped("delete", id, self.store.try_update(|s| s.delete(id)));
    }

    /// Status comes straight from the selector, so it is parsed here.
    /// The row already shows the new value: no re-render.
    pub fn set_status(&self, id: TodoId, value: &str) {
        match value.parse::<Status>() {
            Ok(status) => skipped(
                "set_status",
                id,
                self.store.try_update_untracked(|s| s.set_status(id, status)),
            ),
            Err(e) => log::warn!("[APP] set_status {} rejected: {}", id, e),
        }
    }

    /// The textarea already shows the typed text: no re-render.
    pub fn edit_memo(&self, id: TodoId, memo: String) {
        skipped("edit_memo", id, self.store.try_update_untracked(|s| s.edit_memo(id, memo)));
    }
}

fn skipped<T>(op: &str, id: TodoId, result: Option<TodoResult<T>>) {
    if let Some(Err(e)) = result {
        log::debug!("[APP] {} {} skipped: {}", op, id, e);
    }
}
