//! Todo Entity

use serde::Serialize;

use super::Status;

/// Item id: creation time in epoch milliseconds, small literals for seed items
pub type TodoId = u64;

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    /// Unique, never reassigned
    pub id: TodoId,
    /// Non-empty when created, no rename
    pub title: String,
    pub done: bool,
    pub status: Status,
    /// Free text, stored verbatim
    pub memo: String,
}

impl Todo {
    /// Create a new item with default values
    pub fn new(id: TodoId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
            status: Status::NotStarted,
            memo: String::new(),
        }
    }

    /// Whether the title, or a non-empty memo, contains `needle`.
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || (!self.memo.is_empty() && self.memo.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_creation() {
        let todo = Todo::new(7, "Write tests");
        assert_eq!(todo.id, 7);
        assert_eq!(todo.title, "Write tests");
        assert!(!todo.done);
        assert_eq!(todo.status, Status::NotStarted);
        assert!(todo.memo.is_empty());
    }

    #[test]
    fn test_matches_title_or_memo() {
        let mut todo = Todo::new(1, "React 공부");
        assert!(todo.matches("react"));
        assert!(todo.matches("공부"));
        assert!(!todo.matches("props"));

        todo.memo = "컴포넌트 Props 실습".to_string();
        assert!(todo.matches("props"));
        // Empty needle matches everything
        assert!(todo.matches(""));
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(Todo::new(3, "x")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "title": "x", "done": false, "status": "시작 전", "memo": ""})
        );
    }
}
