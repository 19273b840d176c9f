//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::render_utils::{InputHint, hint_spans, spinner};
use crate::features::{auth, proteins, searches};
use crate::state::{AppState, Screen};

/// Height of the header and status lines.
const BAR_HEIGHT: u16 = 1;

/// Horizontal margin of the main pane.
const BODY_MARGIN: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(BAR_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(BAR_HEIGHT),
    ])
    .areas(frame.area());

    render_header(app, frame, header);

    let body = Rect {
        x: body.x + BODY_MARGIN,
        y: body.y + 1,
        width: body.width.saturating_sub(BODY_MARGIN * 2),
        height: body.height.saturating_sub(1),
    };
    match app.screen() {
        Screen::Login => auth::render_login(app, frame, body),
        Screen::Searches => searches::render_searches(app, frame, body),
        Screen::Proteins => proteins::render_proteins(app, frame, body),
    }

    render_status_line(app, frame, status);
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let style = Style::default().bg(Color::Blue).fg(Color::White);
    let title = format!(
        " Chaparral Search Viewer ({}) ",
        app.variant.display_name()
    );
    let who = app.session.user().map_or_else(
        || "not logged in ".to_string(),
        |user| format!("{} ", user.display_line()),
    );

    let who_width = u16::try_from(who.chars().count()).unwrap_or(area.width);
    let [left, right] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(who_width)]).areas(area);
    frame.render_widget(
        Paragraph::new(Span::styled(title, style.add_modifier(Modifier::BOLD))).style(style),
        left,
    );
    frame.render_widget(Paragraph::new(who).style(style), right);
}

fn screen_hints(screen: Screen) -> Vec<InputHint<'static>> {
    match screen {
        Screen::Login => vec![InputHint::new("Enter", "log in"), InputHint::new("Ctrl+C", "quit")],
        Screen::Searches => vec![
            InputHint::new("↑↓", "move"),
            InputHint::new("Enter", "open search"),
            InputHint::new("r", "reload"),
            InputHint::new("Ctrl+L", "log out"),
            InputHint::new("q", "quit"),
        ],
        Screen::Proteins => vec![
            InputHint::new("↑↓", "move"),
            InputHint::new("Enter", "select protein"),
            InputHint::new("o", "open viewer"),
            InputHint::new("c", "change search"),
            InputHint::new("r", "reload"),
            InputHint::new("Ctrl+L", "log out"),
            InputHint::new("q", "quit"),
        ],
    }
}

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    if app.tasks.is_any_running() {
        spans.push(Span::styled(
            format!(" {} ", spinner(app.spinner_frame)),
            Style::default().fg(Color::Cyan),
        ));
    } else {
        spans.push(Span::raw(" "));
    }
    spans.extend(hint_spans(&screen_hints(app.screen()), Color::Cyan));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use chapview_core::api::{AuthError, SearchId, SearchResult, SearchStatus, UserProfile};
    use chapview_core::config::Config;
    use chapview_core::proteins::protein_rows;
    use chapview_core::session::SessionEvent;
    use chapview_core::viewer::Variant;
    use chapview_core::workflow::{ProteinTable, SearchOverview};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::common::Load;

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn search(id: &str, name: &str) -> SearchResult {
        SearchResult {
            id: SearchId::new(id),
            name: Some(name.to_string()),
            status: SearchStatus::Succeeded,
            project_id: None,
            created_at: Some("2024-05-01".to_string()),
            updated_at: None,
            extra: Default::default(),
        }
    }

    fn logged_in(variant: Variant) -> AppState {
        let mut app = AppState::new(Config::default(), variant, None);
        app.session.apply(SessionEvent::LoginSucceeded {
            user: UserProfile {
                id: None,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            },
            api_key: "key-1".to_string(),
        });
        app
    }

    fn on_search(variant: Variant, proteins: ProteinTable) -> AppState {
        let mut app = logged_in(variant);
        app.session
            .apply(SessionEvent::SearchSelected(SearchId::new("sr-1")));
        app.proteins.overview = Load::Loaded(SearchOverview {
            search: search("sr-1", "HeLa digest"),
            proteins,
        });
        app
    }

    #[test]
    fn test_login_screen_masks_key_and_shows_error() {
        let mut app = AppState::new(Config::default(), Variant::Peptides, Some("secret".into()));
        app.session.apply(SessionEvent::LoginFailed(AuthError::EmptyKey));
        let screen = draw(&app);
        assert!(screen.contains("Log in to Chaparral"));
        assert!(screen.contains("••••••"));
        assert!(!screen.contains("secret"));
        assert!(screen.contains("Login failed: API key is empty"));
        assert!(screen.contains("not logged in"));
    }

    #[test]
    fn test_search_table_lists_searches() {
        let mut app = logged_in(Variant::RedundantPeptides);
        app.searches.list = Load::Loaded(vec![search("sr-1", "HeLa digest")]);
        let screen = draw(&app);
        assert!(screen.contains("Ada Lovelace (ada@example.com)"));
        assert!(screen.contains("redundant peptides"));
        assert!(screen.contains("HeLa digest"));
        assert!(screen.contains("SUCCEEDED"));
    }

    #[test]
    fn test_search_failure_is_rendered() {
        let mut app = logged_in(Variant::Peptides);
        app.searches.list = Load::Failed("HTTP 500".to_string());
        let screen = draw(&app);
        assert!(screen.contains("Failed to load search results: HTTP 500"));
    }

    #[test]
    fn test_empty_protein_listing_warns() {
        let app = on_search(Variant::Peptides, ProteinTable::Empty);
        let screen = draw(&app);
        assert!(screen.contains("HeLa digest"));
        assert!(screen.contains("No proteins found for this search result."));
        assert!(!screen.contains("Peptide sequences"));
    }

    #[test]
    fn test_protein_table_columns_follow_variant() {
        let records = vec![chapview_core::api::ProteinRecord {
            name: "sp|P12345|EXAMPLE_HUMAN".to_string(),
            peptide_sequences: vec!["AAA".to_string(), "BBB".to_string()],
            ..Default::default()
        }];

        let plain = draw(&on_search(
            Variant::Peptides,
            ProteinTable::Rows(protein_rows(records.clone())),
        ));
        assert!(plain.contains("sp|P12345|EXAMPLE_HUMAN"));
        assert!(plain.contains("AAA;BBB"));
        assert!(!plain.contains("seq_cnt"));

        let redundant = draw(&on_search(
            Variant::RedundantPeptides,
            ProteinTable::Rows(protein_rows(records)),
        ));
        assert!(redundant.contains("seq_cnt"));
    }
}
