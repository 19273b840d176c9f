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
    SearchList,
    SearchOverview,
    ViewerLink,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
///
/// Only the most recently started task of a kind is active; completions from
/// tasks it replaced are discarded.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn start(&mut self, id: TaskId) {
        self.active = Some(id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub search_list: TaskState,
    pub search_overview: TaskState,
    pub viewer_link: TaskState,
}

impl Tasks {
    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Login => &mut self.login,
            TaskKind::SearchList => &mut self.search_list,
            TaskKind::SearchOverview => &mut self.search_overview,
            TaskKind::ViewerLink => &mut self.viewer_link,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.login.is_running()
            || self.search_list.is_running()
            || self.search_overview.is_running()
            || self.viewer_link.is_running()
    }

    pub fn clear_all(&mut self) {
        self.login.clear();
        self.search_list.clear();
        self.search_overview.clear();
        self.viewer_link.clear();
    }
}
