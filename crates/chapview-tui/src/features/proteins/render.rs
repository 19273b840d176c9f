//! Protein page: selected search, protein table, selected protein.

use chapview_core::proteins::{ProteinRow, serialize_peptides};
use chapview_core::viewer::Variant;
use chapview_core::workflow::{ProteinTable, SearchOverview};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};

use super::state::{ProteinSelection, ProteinsState};
use crate::common::render_utils::{render_separator, spinner};
use crate::common::{Load, truncate_with_ellipsis};
use crate::features::searches::{search_cells, search_header, search_widths};
use crate::state::AppState;

/// Widest peptide list shown in a table cell.
const PEPTIDE_CELL_WIDTH: usize = 80;

const SELECTION_HEIGHT: u16 = 6;

pub fn render_proteins(app: &AppState, frame: &mut Frame, area: Rect) {
    let state = &app.proteins;
    match &state.overview {
        Load::Idle | Load::Loading => {
            frame.render_widget(
                Paragraph::new(format!(
                    "{} Loading search result…",
                    spinner(app.spinner_frame)
                ))
                .style(Style::default().fg(Color::Gray)),
                area,
            );
        }
        Load::Failed(message) => {
            frame.render_widget(
                Paragraph::new(format!("Failed to load search result: {message}"))
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true }),
                area,
            );
        }
        Load::Loaded(overview) => render_overview(app, state, overview, frame, area),
    }
}

fn render_overview(
    app: &AppState,
    state: &ProteinsState,
    overview: &SearchOverview,
    frame: &mut Frame,
    area: Rect,
) {
    let selection_height = if state.selection.is_some() {
        SELECTION_HEIGHT
    } else {
        0
    };
    let [search_title, search_table, separator, proteins_title, proteins, selection] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(selection_height),
        ])
        .areas(area);

    frame.render_widget(heading("Selected search result"), search_title);
    let table = Table::new([Row::new(search_cells(&overview.search))], search_widths())
        .header(search_header())
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(table, search_table);
    render_separator(frame, separator, 0);

    match &overview.proteins {
        ProteinTable::Empty => {
            frame.render_widget(
                Paragraph::new("No proteins found for this search result.")
                    .style(Style::default().fg(Color::Yellow)),
                proteins_title,
            );
        }
        ProteinTable::Rows(rows) => {
            frame.render_widget(
                heading(&format!("Proteins ({})", rows.len())),
                proteins_title,
            );
            render_protein_table(frame, proteins, rows, app.variant, state);
            if let Some(selected) = &state.selection {
                render_selection(app, selected, frame, selection);
            }
        }
    }
}

fn heading(text: &str) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
}

fn render_protein_table(
    frame: &mut Frame,
    area: Rect,
    rows: &[ProteinRow],
    variant: Variant,
    state: &ProteinsState,
) {
    let selected_index = state.selection.as_ref().map(|s| s.index);
    let counts = variant.shows_peptide_counts();

    let table_rows = rows.iter().enumerate().map(|(i, row)| {
        let marker = if Some(i) == selected_index { "●" } else { " " };
        let mut cells = vec![
            Cell::from(marker).style(Style::default().fg(Color::Green)),
            Cell::from(row.name().to_string()),
            Cell::from(truncate_with_ellipsis(
                &serialize_peptides(row.peptide_sequences()),
                PEPTIDE_CELL_WIDTH,
            )),
        ];
        if counts {
            cells.push(Cell::from(row.seq_cnt.to_string()));
        }
        Row::new(cells)
    });

    let mut header = vec!["", "Name", "Peptide sequences"];
    let mut widths = vec![
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Fill(2),
    ];
    if counts {
        header.push("seq_cnt");
        widths.push(Constraint::Length(8));
    }

    let table = Table::new(table_rows, widths)
        .header(Row::new(header).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default().with_selected(state.highlighted_index());
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_selection(app: &AppState, selection: &ProteinSelection, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Selected protein ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(vec![
        Span::styled("Protein: ", Style::default().fg(Color::DarkGray)),
        Span::raw(selection.protein_name.clone()),
    ])];

    match &selection.link {
        Load::Idle | Load::Loading => lines.push(Line::from(format!(
            "{} Fetching peptides…",
            spinner(app.spinner_frame)
        ))),
        Load::Failed(message) => lines.push(Line::from(Span::styled(
            format!("Cannot build viewer link: {message}"),
            Style::default().fg(Color::Red),
        ))),
        Load::Loaded(link) => {
            lines.push(Line::from(vec![
                Span::styled("Peptides: ", Style::default().fg(Color::DarkGray)),
                Span::raw(truncate_with_ellipsis(
                    &link.serialized_peptides,
                    usize::from(inner.width).saturating_sub(10),
                )),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Viewer: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    link.url.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
