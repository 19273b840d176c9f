//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{auth, proteins, searches};
use crate::state::{AppState, Screen};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, task = completed.id.0, "dropping stale task result");
                vec![]
            }
        }
        UiEvent::LoginFinished { api_key, result } => {
            auth::handle_login_result(app, api_key, result)
        }
        UiEvent::SearchesLoaded(result) => searches::handle_loaded(app, result),
        UiEvent::OverviewLoaded { search_id, result } => {
            proteins::handle_overview_loaded(app, search_id, result)
        }
        UiEvent::LinkResolved {
            protein_name,
            result,
        } => proteins::handle_link_resolved(app, &protein_name, result),
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) if app.screen() == Screen::Login => {
            auth::handle_paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return vec![UiEffect::Quit],
        KeyCode::Char('l') if ctrl && app.session.is_authenticated() => {
            return auth::logout(app);
        }
        _ => {}
    }

    match app.screen() {
        Screen::Login => auth::handle_key(app, key),
        Screen::Searches | Screen::Proteins if key.code == KeyCode::Char('q') && !ctrl => {
            vec![UiEffect::Quit]
        }
        Screen::Searches => searches::handle_key(app, key),
        Screen::Proteins => proteins::handle_key(app, key),
    }
}

#[cfg(test)]
mod tests {
    use chapview_core::api::{
        ApiError, AuthError, ProteinRecord, SearchId, SearchResult, SearchStatus, UserProfile,
    };
    use chapview_core::config::Config;
    use chapview_core::proteins::protein_rows;
    use chapview_core::viewer::Variant;
    use chapview_core::workflow::{ProteinTable, SearchOverview};

    use super::*;
    use crate::common::{Load, TaskCompleted, TaskId, TaskKind};

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(ch: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::CONTROL,
        )))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            update(app, key(KeyCode::Char(ch)));
        }
    }

    fn user() -> UserProfile {
        UserProfile {
            id: Some("u-1".to_string()),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn search(id: &str) -> SearchResult {
        SearchResult {
            id: SearchId::new(id),
            name: Some(format!("search {id}")),
            status: SearchStatus::Succeeded,
            project_id: None,
            created_at: None,
            updated_at: None,
            extra: Default::default(),
        }
    }

    fn protein(name: &str, peptides: &[&str]) -> ProteinRecord {
        ProteinRecord {
            name: name.to_string(),
            peptide_sequences: peptides.iter().map(ToString::to_string).collect(),
            ..ProteinRecord::default()
        }
    }

    fn overview(id: &str, records: Vec<ProteinRecord>) -> SearchOverview {
        SearchOverview {
            search: search(id),
            proteins: if records.is_empty() {
                ProteinTable::Empty
            } else {
                ProteinTable::Rows(protein_rows(records))
            },
        }
    }

    /// Feeds `event` back as the completion of the single effect's task.
    fn complete(app: &mut AppState, kind: TaskKind, task: TaskId, event: UiEvent) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id: task,
                    result: Box::new(event),
                },
            },
        )
    }

    fn app(variant: Variant) -> AppState {
        AppState::new(Config::default(), variant, None)
    }

    /// Logs in and loads one search into the table.
    fn logged_in(variant: Variant) -> AppState {
        let mut app = app(variant);
        type_text(&mut app, "key-1");
        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::Authenticate { task, .. }] = effects.as_slice() else {
            panic!("expected authenticate effect, got {effects:?}");
        };
        let effects = complete(
            &mut app,
            TaskKind::Login,
            *task,
            UiEvent::LoginFinished {
                api_key: "key-1".to_string(),
                result: Ok(user()),
            },
        );
        let [UiEffect::LoadSearches { task, .. }] = effects.as_slice() else {
            panic!("expected search listing, got {effects:?}");
        };
        complete(
            &mut app,
            TaskKind::SearchList,
            *task,
            UiEvent::SearchesLoaded(Ok(vec![search("sr-1"), search("sr-2")])),
        );
        app
    }

    /// Selects the first search and loads `records` as its proteins.
    fn with_proteins(variant: Variant, records: Vec<ProteinRecord>) -> AppState {
        let mut app = logged_in(variant);
        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::LoadOverview { task, .. }] = effects.as_slice() else {
            panic!("expected overview load, got {effects:?}");
        };
        complete(
            &mut app,
            TaskKind::SearchOverview,
            *task,
            UiEvent::OverviewLoaded {
                search_id: SearchId::new("sr-1"),
                result: Ok(overview("sr-1", records)),
            },
        );
        app
    }

    #[test]
    fn test_starts_on_login_screen_with_prefilled_key() {
        let app = AppState::new(Config::default(), Variant::Peptides, Some("env-key".into()));
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(app.login.input(), "env-key");
        assert!(!app.tasks.is_any_running());
    }

    #[test]
    fn test_blank_key_fails_without_request() {
        let mut app = app(Variant::Peptides);
        type_text(&mut app, "   ");
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.session.login_error(), Some("Login failed: API key is empty"));
        assert_eq!(app.screen(), Screen::Login);
    }

    #[test]
    fn test_submit_sends_trimmed_key() {
        let mut app = app(Variant::Peptides);
        type_text(&mut app, " key-1 ");
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::Authenticate { api_key, .. }] if api_key == "key-1"
        ));
        assert!(app.tasks.login.is_running());
    }

    #[test]
    fn test_rejected_login_stays_on_login_screen() {
        let mut app = app(Variant::Peptides);
        type_text(&mut app, "bad");
        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::Authenticate { task, .. }] = effects.as_slice() else {
            panic!("expected authenticate effect");
        };
        let effects = complete(
            &mut app,
            TaskKind::Login,
            *task,
            UiEvent::LoginFinished {
                api_key: "bad".to_string(),
                result: Err(AuthError::Rejected {
                    status: 401,
                    message: "Invalid API key".to_string(),
                }),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(app.screen(), Screen::Login);
        assert!(app.session.login_error().is_some());
        assert_eq!(app.session.api_key(), None);
    }

    #[test]
    fn test_login_success_loads_searches() {
        let app = logged_in(Variant::Peptides);
        assert_eq!(app.screen(), Screen::Searches);
        assert_eq!(app.session.api_key(), Some("key-1"));
        assert_eq!(app.login.input(), "");
        assert_eq!(app.searches.rows().len(), 2);
    }

    #[test]
    fn test_redundant_variant_requests_its_filter() {
        let mut app = app(Variant::RedundantPeptides);
        type_text(&mut app, "key-1");
        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::Authenticate { task, .. }] = effects.as_slice() else {
            panic!("expected authenticate effect");
        };
        let effects = complete(
            &mut app,
            TaskKind::Login,
            *task,
            UiEvent::LoginFinished {
                api_key: "key-1".to_string(),
                result: Ok(user()),
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::LoadSearches {
                variant: Variant::RedundantPeptides,
                ..
            }]
        ));
    }

    #[test]
    fn test_search_listing_failure_is_shown() {
        let mut app = logged_in(Variant::Peptides);
        let effects = update(&mut app, key(KeyCode::Char('r')));
        let [UiEffect::LoadSearches { task, .. }] = effects.as_slice() else {
            panic!("expected reload");
        };
        complete(
            &mut app,
            TaskKind::SearchList,
            *task,
            UiEvent::SearchesLoaded(Err(ApiError::status("/search_result", 500, "boom"))),
        );
        assert!(app.searches.list.error().is_some_and(|e| e.contains("500")));
        assert_eq!(app.screen(), Screen::Searches);
    }

    #[test]
    fn test_select_search_uses_highlighted_row() {
        let mut app = logged_in(Variant::Peptides);
        update(&mut app, key(KeyCode::Down));
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::LoadOverview { search_id, api_key, .. }]
                if search_id == &SearchId::new("sr-2") && api_key == "key-1"
        ));
        assert_eq!(app.screen(), Screen::Proteins);
        assert!(app.proteins.overview.is_loading());
    }

    #[test]
    fn test_stale_overview_is_dropped() {
        let mut app = logged_in(Variant::Peptides);
        let effects = update(&mut app, key(KeyCode::Enter));
        let [UiEffect::LoadOverview { task: first, .. }] = effects.as_slice() else {
            panic!("expected overview load");
        };
        let first = *first;

        // Reload before the first request answers.
        let effects = update(&mut app, key(KeyCode::Char('r')));
        assert_eq!(effects.len(), 1);

        complete(
            &mut app,
            TaskKind::SearchOverview,
            first,
            UiEvent::OverviewLoaded {
                search_id: SearchId::new("sr-1"),
                result: Ok(overview("sr-1", vec![protein("sp|P1|A_HUMAN", &["AAA"])])),
            },
        );
        assert!(app.proteins.overview.is_loading());
    }

    #[test]
    fn test_empty_protein_listing_has_no_rows() {
        let mut app = with_proteins(Variant::Peptides, vec![]);
        assert!(app.proteins.rows().is_empty());
        assert!(
            app.proteins
                .overview
                .loaded()
                .is_some_and(|o| o.proteins.is_empty())
        );
        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
        assert!(app.proteins.selection.is_none());
    }

    #[test]
    fn test_select_protein_builds_link_immediately() {
        let mut app = with_proteins(
            Variant::Peptides,
            vec![protein("sp|P12345|EXAMPLE_HUMAN", &["AAA", "BBB"])],
        );
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());

        let link = app.proteins.ready_link().expect("link").clone();
        assert_eq!(
            link.url,
            "https://pdb-coverage.streamlit.app/?protein_id=P12345&input_type=peptides&input=AAA;BBB"
        );

        let effects = update(&mut app, key(KeyCode::Char('o')));
        assert_eq!(
            effects,
            vec![UiEffect::OpenBrowser {
                url: link.url.clone()
            }]
        );
    }

    #[test]
    fn test_selecting_another_protein_replaces_selection() {
        let mut app = with_proteins(
            Variant::Peptides,
            vec![
                protein("sp|P1|A_HUMAN", &["AAA"]),
                protein("sp|P2|B_HUMAN", &["BBB"]),
            ],
        );
        update(&mut app, key(KeyCode::Enter));
        update(&mut app, key(KeyCode::Down));
        update(&mut app, key(KeyCode::Enter));

        let selection = app.proteins.selection.as_ref().expect("selection");
        assert_eq!(selection.index, 1);
        assert_eq!(selection.protein_name, "sp|P2|B_HUMAN");
    }

    #[test]
    fn test_malformed_protein_name_shows_error() {
        let mut app = with_proteins(Variant::RedundantPeptides, vec![protein("badname", &["AAA"])]);
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        let selection = app.proteins.selection.as_ref().expect("selection");
        assert!(selection.link.error().is_some());
        assert!(update(&mut app, key(KeyCode::Char('o'))).is_empty());
    }

    #[test]
    fn test_redundant_protein_resolves_link_async() {
        let mut app = with_proteins(
            Variant::RedundantPeptides,
            vec![protein("sp|P12345|EXAMPLE_HUMAN", &["AAA", "BBB"])],
        );
        let effects = update(&mut app, key(KeyCode::Enter));
        let [
            UiEffect::ResolveLink {
                task,
                search_id,
                row,
                ..
            },
        ] = effects.as_slice()
        else {
            panic!("expected link resolution, got {effects:?}");
        };
        assert_eq!(search_id, &SearchId::new("sr-1"));
        assert_eq!(row.seq_cnt, 2);
        assert!(
            app.proteins
                .selection
                .as_ref()
                .is_some_and(|s| s.link.is_loading())
        );

        let link = chapview_core::viewer::ViewerLink::build(
            Config::DEFAULT_VIEWER_URL,
            "sp|P12345|EXAMPLE_HUMAN".parse().unwrap(),
            Variant::RedundantPeptides,
            "AAA;3,BBB;5".to_string(),
        )
        .unwrap();
        complete(
            &mut app,
            TaskKind::ViewerLink,
            *task,
            UiEvent::LinkResolved {
                protein_name: "sp|P12345|EXAMPLE_HUMAN".to_string(),
                result: Ok(link.clone()),
            },
        );
        assert_eq!(app.proteins.ready_link(), Some(&link));
    }

    #[test]
    fn test_change_search_returns_to_table() {
        let mut app = with_proteins(Variant::Peptides, vec![protein("sp|P1|A_HUMAN", &["AAA"])]);
        let effects = update(&mut app, key(KeyCode::Char('c')));
        assert!(matches!(effects.as_slice(), [UiEffect::LoadSearches { .. }]));
        assert_eq!(app.screen(), Screen::Searches);
        assert_eq!(app.session.search_id(), None);
        assert_eq!(app.proteins.overview, Load::Idle);
    }

    #[test]
    fn test_logout_clears_session_and_views() {
        let mut app = with_proteins(Variant::Peptides, vec![protein("sp|P1|A_HUMAN", &["AAA"])]);
        update(&mut app, ctrl('l'));
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(app.session.user(), None);
        assert!(app.searches.rows().is_empty());
        assert!(app.proteins.rows().is_empty());
        assert!(!app.tasks.is_any_running());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(Variant::Peptides);
        assert_eq!(update(&mut app, ctrl('c')), vec![UiEffect::Quit]);
        // 'q' is text on the login form.
        assert!(update(&mut app, key(KeyCode::Char('q'))).is_empty());
        assert_eq!(app.login.input(), "q");

        let mut app = logged_in(Variant::Peptides);
        assert_eq!(update(&mut app, key(KeyCode::Char('q'))), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_paste_fills_login_form() {
        let mut app = app(Variant::Peptides);
        update(&mut app, UiEvent::Terminal(Event::Paste("abc\n".to_string())));
        assert_eq!(app.login.input(), "abc");
    }
}
