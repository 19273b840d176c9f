//! Application state composition.
//!
//! ```text
//! AppState
//! ├── config / variant        (fixed for the lifetime of the dashboard)
//! ├── session: Session        (login status + selected search)
//! ├── login: LoginForm        (API key input)
//! ├── searches: SearchesState (search table)
//! ├── proteins: ProteinsState (search detail, protein table, selected protein)
//! ├── task_seq: TaskSeq       (async task id generator)
//! └── tasks: Tasks            (task lifecycle state)
//! ```
//!
//! The visible screen is derived from the session, never stored.

use chapview_core::config::Config;
use chapview_core::session::Session;
use chapview_core::viewer::Variant;

use crate::common::{TaskId, TaskKind, TaskSeq, Tasks};
use crate::features::auth::LoginForm;
use crate::features::proteins::ProteinsState;
use crate::features::searches::SearchesState;

/// Which page of the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Searches,
    Proteins,
}

pub struct AppState {
    pub config: Config,
    pub variant: Variant,
    pub session: Session,
    pub login: LoginForm,
    pub searches: SearchesState,
    pub proteins: ProteinsState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    /// `initial_key` pre-fills the login form; it is not submitted.
    pub fn new(config: Config, variant: Variant, initial_key: Option<String>) -> Self {
        Self {
            config,
            variant,
            session: Session::new(),
            login: LoginForm::with_key(initial_key),
            searches: SearchesState::default(),
            proteins: ProteinsState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        if !self.session.is_authenticated() {
            Screen::Login
        } else if self.session.search_id().is_none() {
            Screen::Searches
        } else {
            Screen::Proteins
        }
    }

    /// Allocates an id for a new task of `kind` and marks it active,
    /// superseding any task of the same kind still in flight.
    pub fn start_task(&mut self, kind: TaskKind) -> TaskId {
        let id = self.task_seq.next_id();
        self.tasks.state_mut(kind).start(id);
        id
    }

    /// Drops everything fetched for the current session.
    pub fn reset_views(&mut self) {
        self.searches = SearchesState::default();
        self.proteins = ProteinsState::default();
        self.tasks.search_list.clear();
        self.tasks.search_overview.clear();
        self.tasks.viewer_link.clear();
    }
}
