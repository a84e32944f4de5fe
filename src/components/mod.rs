//! UI Components
//!
//! Leptos components for the list view.

mod search_box;
mod status_select;
mod todo_input;
mod todo_list;
mod todo_row;

pub use search_box::SearchBox;
pub use status_select::StatusSelect;
pub use todo_input::TodoInput;
pub use todo_list::TodoList;
pub use todo_row::TodoRow;
