//! UI event types.
//!
//! Everything the reducer reacts to: terminal input, the frame tick, and the
//! results of async tasks spawned by the runtime.

use chapview_core::api::{ApiError, AuthError, SearchId, SearchResult, UserProfile};
use chapview_core::viewer::ViewerLink;
use chapview_core::workflow::{SearchOverview, ViewerLinkError};
use crossterm::event::Event;

use crate::common::{TaskCompleted, TaskKind};

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (spinner animation).
    Tick,

    /// Raw terminal input.
    Terminal(Event),

    /// An async task finished. The reducer unwraps `result` only when the
    /// task is still the active one of its kind.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Profile request for a submitted key finished.
    LoginFinished {
        api_key: String,
        result: Result<UserProfile, AuthError>,
    },

    /// Search listing finished.
    SearchesLoaded(Result<Vec<SearchResult>, ApiError>),

    /// Search detail and protein listing finished.
    OverviewLoaded {
        search_id: SearchId,
        result: Result<SearchOverview, ApiError>,
    },

    /// Viewer link for a selected protein finished.
    LinkResolved {
        protein_name: String,
        result: Result<ViewerLink, ViewerLinkError>,
    },
}
