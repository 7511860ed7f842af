//! Async task bookkeeping.
//!
//! Each kind of request has at most one task in flight. The reducer starts a
//! task by allocating an id and a cancellation token; the runtime spawns the
//! matching handler wrapped in that token. Completion events carry the id
//! back, and results whose id no longer matches the active task are dropped,
//! so a response can never land on a screen that navigated away.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Login,
    Register,
    TodoList,
    TodoFetch,
    TodoUpdate,
}

/// Lifecycle state for one task kind (mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Clears the state if `id` is the active task. Returns false for stale
    /// completions, which the reducer discards.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub register: TaskState,
    pub todo_list: TaskState,
    pub todo_fetch: TaskState,
    pub todo_update: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Login => &self.login,
            TaskKind::Register => &self.register,
            TaskKind::TodoList => &self.todo_list,
            TaskKind::TodoFetch => &self.todo_fetch,
            TaskKind::TodoUpdate => &self.todo_update,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Login => &mut self.login,
            TaskKind::Register => &mut self.register,
            TaskKind::TodoList => &mut self.todo_list,
            TaskKind::TodoFetch => &mut self.todo_fetch,
            TaskKind::TodoUpdate => &mut self.todo_update,
        }
    }

    /// Marks a task of the given kind as started and returns its id plus the
    /// cancellation token the runtime scopes the request to.
    pub fn begin(&mut self, seq: &mut TaskSeq, kind: TaskKind) -> (TaskId, CancellationToken) {
        let id = seq.next_id();
        let cancel = CancellationToken::new();
        let state = self.state_mut(kind);
        state.active = Some(id);
        state.cancel = Some(cancel.clone());
        (id, cancel)
    }

    pub fn is_any_running(&self) -> bool {
        self.login.is_running()
            || self.register.is_running()
            || self.todo_list.is_running()
            || self.todo_fetch.is_running()
            || self.todo_update.is_running()
    }
}
