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
    ListFetch,
    Login,
    Register,
    Create,
    Delete,
    Download,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
        self.cancel = started.cancel.clone();
    }

    /// Clears the state if `id` is the active task. Completions of superseded
    /// tasks return `false` and must be dropped.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.clear();
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
    pub list_fetch: TaskState,
    pub login: TaskState,
    pub register: TaskState,
    pub create: TaskState,
    pub delete: TaskState,
    pub download: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::ListFetch => &mut self.list_fetch,
            TaskKind::Login => &mut self.login,
            TaskKind::Register => &mut self.register,
            TaskKind::Create => &mut self.create,
            TaskKind::Delete => &mut self.delete,
            TaskKind::Download => &mut self.download,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.list_fetch.is_running()
            || self.login.is_running()
            || self.register.is_running()
            || self.create.is_running()
            || self.delete.is_running()
            || self.download.is_running()
    }

    /// Drops every task, returning the cancel tokens that were held.
    pub fn clear_all(&mut self) -> Vec<CancellationToken> {
        let mut tokens = Vec::new();
        for state in [
            &mut self.list_fetch,
            &mut self.login,
            &mut self.register,
            &mut self.create,
            &mut self.delete,
            &mut self.download,
        ] {
            if let Some(token) = state.cancel.take() {
                tokens.push(token);
            }
            state.clear();
        }
        tokens
    }
}
