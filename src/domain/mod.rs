//! Domain Layer
//!
//! The to-do entity, its status and the errors of operations on it.
//! No web dependencies: everything here is testable natively.

mod error;
mod status;
mod todo;

pub use error::{TodoError, TodoResult};
pub use status::Status;
pub use todo::{Todo, TodoId};
