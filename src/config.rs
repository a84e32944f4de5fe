//! App Configuration
//!
//! Compile-time settings. A browser app has no environment or config file,
//! so everything comes from `Default` and cargo features:
//! `persist` (on by default) and `newest-first`.

use log::LevelFilter;

use crate::domain::Todo;

/// localStorage key holding the whole list
pub const STORAGE_KEY: &str = "todoList";

/// Where the list lives between page loads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Read from and write to localStorage
    LocalStorage,
    /// Start from the seed list every time
    Memory,
}

/// Order of rows on screen. The stored list is always in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayOrder {
    #[default]
    Insertion,
    NewestFirst,
}

impl DisplayOrder {
    pub fn arrange(self, mut items: Vec<Todo>) -> Vec<Todo> {
        if self == DisplayOrder::NewestFirst {
            items.reverse();
        }
        items
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_key: String,
    pub persistence: Persistence,
    pub display_order: DisplayOrder,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            persistence: if cfg!(feature = "persist") {
                Persistence::LocalStorage
            } else {
                Persistence::Memory
            },
            display_order: if cfg!(feature = "newest-first") {
                DisplayOrder::NewestFirst
            } else {
                DisplayOrder::Insertion
            },
            log_level: if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
        }
    }
}
