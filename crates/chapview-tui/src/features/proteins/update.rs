use chapview_core::api::{ApiError, SearchId};
use chapview_core::session::SessionEvent;
use chapview_core::viewer::ViewerLink;
use chapview_core::workflow::{self, SearchOverview, ViewerLinkError};
use crossterm::event::{KeyCode, KeyEvent};

use super::state::{ProteinSelection, ProteinsState};
use crate::common::{Load, TaskKind};
use crate::effects::UiEffect;
use crate::features::searches::{self, PAGE_STEP};
use crate::state::AppState;

/// Starts (or restarts) loading the selected search's detail and proteins.
pub fn start_loading(app: &mut AppState) -> Vec<UiEffect> {
    let (Some(api_key), Some(search_id)) = (app.session.api_key(), app.session.search_id())
    else {
        return vec![];
    };
    let api_key = api_key.to_string();
    let search_id = search_id.clone();

    app.proteins = ProteinsState::loading();
    app.tasks.viewer_link.clear();
    let task = app.start_task(TaskKind::SearchOverview);
    vec![UiEffect::LoadOverview {
        task,
        api_key,
        search_id,
    }]
}

pub fn handle_overview_loaded(
    app: &mut AppState,
    search_id: SearchId,
    result: Result<SearchOverview, ApiError>,
) -> Vec<UiEffect> {
    if app.session.search_id() != Some(&search_id) {
        tracing::debug!(%search_id, "dropping overview for a search that is no longer selected");
        return vec![];
    }
    match &result {
        Ok(overview) if overview.proteins.is_empty() => {
            tracing::warn!(%search_id, "no proteins for search");
        }
        Ok(overview) => {
            tracing::debug!(%search_id, count = overview.proteins.rows().len(), "protein table loaded");
        }
        Err(err) => tracing::error!(%search_id, error = %err, "failed to load search"),
    }
    app.proteins.overview = Load::from_result(result);
    vec![]
}

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let len = app.proteins.rows().len();
    let cursor = &mut app.proteins.cursor;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => cursor.up(len),
        KeyCode::Down | KeyCode::Char('j') => cursor.down(len),
        KeyCode::PageUp => cursor.up_by(PAGE_STEP, len),
        KeyCode::PageDown => cursor.down_by(PAGE_STEP, len),
        KeyCode::Home | KeyCode::Char('g') => cursor.first(),
        KeyCode::End | KeyCode::Char('G') => cursor.last(len),
        KeyCode::Enter => return select_highlighted(app),
        KeyCode::Char('o') => return open_link(app),
        KeyCode::Char('c') => return change_search(app),
        KeyCode::Char('r') => return start_loading(app),
        _ => {}
    }
    vec![]
}

/// Selects the highlighted protein, replacing any previous selection, and
/// builds its viewer link.
pub fn select_highlighted(app: &mut AppState) -> Vec<UiEffect> {
    let Some(index) = app.proteins.highlighted_index() else {
        return vec![];
    };
    let row = app.proteins.rows()[index].clone();
    let protein_name = row.name().to_string();
    tracing::info!(protein = %protein_name, "protein selected");

    // A malformed name fails here, before any peptide request.
    if let Err(err) = row.parse_name() {
        tracing::warn!(error = %err, "cannot build viewer link");
        set_selection(app, index, &protein_name, Load::Failed(err.to_string()));
        app.tasks.viewer_link.clear();
        return vec![];
    }

    if !app.variant.fetches_peptides() {
        let link = Load::from_result(workflow::peptide_link(&app.config.viewer_url, &row));
        set_selection(app, index, &protein_name, link);
        app.tasks.viewer_link.clear();
        return vec![];
    }

    let (Some(api_key), Some(search_id)) = (app.session.api_key(), app.session.search_id())
    else {
        return vec![];
    };
    let api_key = api_key.to_string();
    let search_id = search_id.clone();
    set_selection(app, index, &protein_name, Load::Loading);
    let task = app.start_task(TaskKind::ViewerLink);
    vec![UiEffect::ResolveLink {
        task,
        api_key,
        variant: app.variant,
        search_id,
        row,
    }]
}

fn set_selection(app: &mut AppState, index: usize, protein_name: &str, link: Load<ViewerLink>) {
    app.proteins.selection = Some(ProteinSelection {
        index,
        protein_name: protein_name.to_string(),
        link,
    });
}

pub fn handle_link_resolved(
    app: &mut AppState,
    protein_name: &str,
    result: Result<ViewerLink, ViewerLinkError>,
) -> Vec<UiEffect> {
    if let Err(err) = &result {
        tracing::error!(protein = %protein_name, error = %err, "failed to build viewer link");
    }
    if let Some(selection) = app.proteins.selection.as_mut()
        && selection.protein_name == protein_name
    {
        selection.link = Load::from_result(result);
    }
    vec![]
}

/// Opens the selected protein's link. Nothing navigates on its own.
pub fn open_link(app: &AppState) -> Vec<UiEffect> {
    app.proteins
        .ready_link()
        .map(|link| UiEffect::OpenBrowser {
            url: link.url.clone(),
        })
        .into_iter()
        .collect()
}

/// Clears the selected search and returns to the search table.
pub fn change_search(app: &mut AppState) -> Vec<UiEffect> {
    app.session.apply(SessionEvent::ChangeSearch);
    app.proteins = ProteinsState::default();
    app.tasks.search_overview.clear();
    app.tasks.viewer_link.clear();
    searches::start_loading(app)
}
