//! Auth feature reducer.
//!
//! Handles the login form, login results and logout.

use chapview_core::api::{AuthError, UserProfile};
use chapview_core::session::SessionEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::features::searches;
use crate::state::AppState;

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // The form is frozen while a key is being checked.
    if app.tasks.login.is_running() {
        return vec![];
    }

    match key.code {
        KeyCode::Enter => submit(app),
        KeyCode::Esc => {
            app.login.clear();
            vec![]
        }
        KeyCode::Backspace => {
            app.login.backspace();
            vec![]
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.login.clear();
            vec![]
        }
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.login.push(c);
            vec![]
        }
        _ => vec![],
    }
}

pub fn handle_paste(app: &mut AppState, text: &str) {
    if !app.tasks.login.is_running() {
        app.login.paste(text);
    }
}

/// Submits the typed key. A blank key fails locally without a request.
pub fn submit(app: &mut AppState) -> Vec<UiEffect> {
    let api_key = app.login.input().trim().to_string();
    if api_key.is_empty() {
        app.session.apply(SessionEvent::LoginFailed(AuthError::EmptyKey));
        return vec![];
    }

    tracing::info!("checking API key");
    let task = app.start_task(TaskKind::Login);
    vec![UiEffect::Authenticate { task, api_key }]
}

pub fn handle_login_result(
    app: &mut AppState,
    api_key: String,
    result: Result<UserProfile, AuthError>,
) -> Vec<UiEffect> {
    match result {
        Ok(user) => {
            tracing::info!(email = %user.email, "logged in");
            app.session
                .apply(SessionEvent::LoginSucceeded { user, api_key });
            app.login.clear();
            app.reset_views();
            searches::start_loading(app)
        }
        Err(err) => {
            tracing::warn!(error = %err, "login failed");
            app.session.apply(SessionEvent::LoginFailed(err));
            vec![]
        }
    }
}

pub fn logout(app: &mut AppState) -> Vec<UiEffect> {
    tracing::info!("logged out");
    app.session.apply(SessionEvent::Logout);
    app.reset_views();
    app.tasks.clear_all();
    vec![]
}
