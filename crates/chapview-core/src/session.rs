//! Per-process session state.
//!
//! ```text
//!   Anonymous ──login ok──▶ Authenticated ──select search──▶ Authenticated + search_id
//!       │  ▲                    │     ▲                              │
//!  login│  │logout         logout    └────────change search──────────┘
//!   err ▼  │                    ▼
//!     Failed ◀──────────── (any) ──logout──▶ Anonymous
//! ```
//!
//! `user` and `api_key` only exist inside [`AuthStatus::Authenticated`], so
//! "authenticated implies both present, otherwise both absent" holds by
//! construction. A search id can only be set while authenticated.

use crate::api::{AuthError, SearchId, UserProfile};

/// Login status of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    /// No login attempted yet (or logged out).
    #[default]
    Anonymous,
    /// Last login attempt failed; the message is shown to the user.
    Failed { error: String },
    /// Logged in.
    Authenticated { user: UserProfile, api_key: String },
}

/// Inputs that change the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    LoginSucceeded { user: UserProfile, api_key: String },
    LoginFailed(AuthError),
    Logout,
    SearchSelected(SearchId),
    ChangeSearch,
}

/// Session state shared by every view of a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    auth: AuthStatus,
    search_id: Option<SearchId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an event. Returns `false` when the event does not apply in the
    /// current state (e.g. selecting a search while logged out) and the
    /// session was left unchanged.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::LoginSucceeded { user, api_key } => {
                self.auth = AuthStatus::Authenticated { user, api_key };
                self.search_id = None;
                true
            }
            SessionEvent::LoginFailed(err) => {
                self.auth = AuthStatus::Failed {
                    error: format!("Login failed: {err}"),
                };
                self.search_id = None;
                true
            }
            SessionEvent::Logout => {
                self.auth = AuthStatus::Anonymous;
                self.search_id = None;
                true
            }
            SessionEvent::SearchSelected(id) => {
                if !self.is_authenticated() {
                    return false;
                }
                self.search_id = Some(id);
                true
            }
            SessionEvent::ChangeSearch => {
                let had_search = self.search_id.is_some();
                self.search_id = None;
                had_search
            }
        }
    }

    pub fn auth(&self) -> &AuthStatus {
        &self.auth
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthStatus::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match &self.auth {
            AuthStatus::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        match &self.auth {
            AuthStatus::Authenticated { api_key, .. } => Some(api_key),
            _ => None,
        }
    }

    pub fn login_error(&self) -> Option<&str> {
        match &self.auth {
            AuthStatus::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn search_id(&self) -> Option<&SearchId> {
        self.search_id.as_ref()
    }
}
