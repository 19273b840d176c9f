use chapview_core::api::{ApiError, SearchResult};
use chapview_core::session::SessionEvent;
use crossterm::event::{KeyCode, KeyEvent};

use crate::common::{Load, TaskKind};
use crate::effects::UiEffect;
use crate::features::proteins;
use crate::state::AppState;

/// Rows moved by PageUp/PageDown.
pub const PAGE_STEP: usize = 10;

/// Starts (or restarts) the search listing for the logged-in user.
pub fn start_loading(app: &mut AppState) -> Vec<UiEffect> {
    let Some(api_key) = app.session.api_key().map(str::to_string) else {
        return vec![];
    };
    app.searches.list = Load::Loading;
    let task = app.start_task(TaskKind::SearchList);
    vec![UiEffect::LoadSearches {
        task,
        api_key,
        variant: app.variant,
    }]
}

pub fn handle_loaded(
    app: &mut AppState,
    result: Result<Vec<SearchResult>, ApiError>,
) -> Vec<UiEffect> {
    match &result {
        Ok(searches) => tracing::debug!(count = searches.len(), "search table loaded"),
        Err(err) => tracing::error!(error = %err, "failed to load searches"),
    }
    app.searches.list = Load::from_result(result);
    vec![]
}

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let len = app.searches.rows().len();
    let cursor = &mut app.searches.cursor;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => cursor.up(len),
        KeyCode::Down | KeyCode::Char('j') => cursor.down(len),
        KeyCode::PageUp => cursor.up_by(PAGE_STEP, len),
        KeyCode::PageDown => cursor.down_by(PAGE_STEP, len),
        KeyCode::Home | KeyCode::Char('g') => cursor.first(),
        KeyCode::End | KeyCode::Char('G') => cursor.last(len),
        KeyCode::Enter => return select_highlighted(app),
        KeyCode::Char('r') => return start_loading(app),
        _ => {}
    }
    vec![]
}

/// Selects the highlighted search and opens its protein page.
pub fn select_highlighted(app: &mut AppState) -> Vec<UiEffect> {
    let Some(search_id) = app.searches.highlighted().map(|s| s.id.clone()) else {
        return vec![];
    };
    tracing::info!(%search_id, "search selected");
    if !app.session.apply(SessionEvent::SearchSelected(search_id)) {
        return vec![];
    }
    app.tasks.search_list.clear();
    proteins::start_loading(app)
}
