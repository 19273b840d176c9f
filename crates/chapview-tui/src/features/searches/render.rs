//! Search selection page.

use chapview_core::api::{SearchResult, SearchStatus};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};

use crate::common::Load;
use crate::common::render_utils::spinner;
use crate::state::AppState;

pub fn render_searches(app: &AppState, frame: &mut Frame, area: Rect) {
    let [title, body] = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Select a search result",
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        title,
    );

    match &app.searches.list {
        Load::Idle | Load::Loading => {
            frame.render_widget(
                Paragraph::new(format!(
                    "{} Loading search results…",
                    spinner(app.spinner_frame)
                ))
                .style(Style::default().fg(Color::Gray)),
                body,
            );
        }
        Load::Failed(message) => {
            frame.render_widget(
                Paragraph::new(format!("Failed to load search results: {message}"))
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true }),
                body,
            );
        }
        Load::Loaded(searches) if searches.is_empty() => {
            frame.render_widget(
                Paragraph::new("No search results found.").style(Style::default().fg(Color::Yellow)),
                body,
            );
        }
        Load::Loaded(searches) => {
            render_search_table(frame, body, searches, app.searches.highlighted_index());
        }
    }
}

pub fn status_style(status: SearchStatus) -> Style {
    match status {
        SearchStatus::Succeeded => Style::default().fg(Color::Green),
        SearchStatus::Failed | SearchStatus::Canceled => Style::default().fg(Color::Red),
        SearchStatus::Pending | SearchStatus::Running => Style::default().fg(Color::Yellow),
        SearchStatus::Unknown => Style::default().fg(Color::DarkGray),
    }
}

pub fn search_cells(search: &SearchResult) -> Vec<Cell<'static>> {
    vec![
        Cell::from(search.name.clone().unwrap_or_else(|| "-".to_string())),
        Cell::from(search.id.to_string()),
        Cell::from(search.status.as_str()).style(status_style(search.status)),
        Cell::from(search.created_at.clone().unwrap_or_default()),
        Cell::from(search.updated_at.clone().unwrap_or_default()),
    ]
}

pub fn search_header() -> Row<'static> {
    Row::new(["Name", "ID", "Status", "Created", "Updated"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}

pub fn search_widths() -> [Constraint; 5] {
    [
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ]
}

fn render_search_table(
    frame: &mut Frame,
    area: Rect,
    searches: &[SearchResult],
    highlighted: Option<usize>,
) {
    let rows = searches.iter().map(|s| Row::new(search_cells(s)));
    let table = Table::new(rows, search_widths())
        .header(search_header())
        .block(Block::default().borders(Borders::TOP))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default().with_selected(highlighted);
    frame.render_stateful_widget(table, area, &mut table_state);
}
