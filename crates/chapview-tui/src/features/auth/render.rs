//! Login screen.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::common::mask_secret;
use crate::common::render_utils::{
    InputHint, InputLine, centered_area, render_container, render_hints, render_input_line,
    spinner,
};
use crate::state::AppState;

const LOGIN_WIDTH: u16 = 64;
const LOGIN_HEIGHT: u16 = 11;

pub fn render_login(app: &AppState, frame: &mut Frame, area: Rect) {
    let popup = centered_area(area, LOGIN_WIDTH, LOGIN_HEIGHT);
    let inner = render_container(frame, popup, "Log in to Chaparral", Color::Cyan);
    let inner = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height,
    );

    let [intro, _, input, _, error, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new("Enter your Chaparral API key.").style(Style::default().fg(Color::Gray)),
        intro,
    );

    if app.tasks.login.is_running() {
        let line = Line::from(vec![
            Span::styled(spinner(app.spinner_frame), Style::default().fg(Color::Cyan)),
            Span::styled(" Checking key…", Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(line), input);
    } else {
        let masked = mask_secret(app.login.input());
        render_input_line(
            frame,
            input,
            &InputLine {
                value: &masked,
                placeholder: Some("API key"),
                prompt: "> ",
                prompt_color: Color::Cyan,
                text_color: Color::White,
                placeholder_color: Color::DarkGray,
                cursor_color: Color::Cyan,
            },
        );
    }

    if let Some(message) = app.session.login_error() {
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true }),
            error,
        );
    }

    render_hints(
        frame,
        hints,
        &[
            InputHint::new("Enter", "log in"),
            InputHint::new("Esc", "clear"),
            InputHint::new("Ctrl+C", "quit"),
        ],
        Color::Cyan,
    );
}
