//! Shared TUI building blocks.

pub mod task;
pub mod text;

pub use task::{TaskId, TaskKind, TaskSeq, TaskState, Tasks};
pub use text::truncate_with_ellipsis;
