//! Shared in-memory todo list.
//!
//! This is the list context other screens read: the todos screen renders it,
//! the detail screen pushes a successfully saved todo back into it so every
//! observer sees the change. Reader and writer run on the single UI thread,
//! so plain ownership is enough; no locking.

use crate::types::Todo;

#[derive(Debug, Default, Clone)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list (after a list fetch).
    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.items = todos;
    }

    /// Replaces the entry matching the todo's id, or appends if the id is
    /// unknown (the list copy may be stale).
    pub fn update_todo(&mut self, todo: Todo) {
        match self.items.iter_mut().find(|t| t.id == todo.id) {
            Some(existing) => *existing = todo,
            None => self.items.push(todo),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn todos(&self) -> &[Todo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
