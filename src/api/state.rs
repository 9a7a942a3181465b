//! Shared state for the web server.

use axum::http::HeaderMap;
use chrono::NaiveDate;

use crate::session::{cookie, Resolved, SessionRegistry};
use crate::storage::config::SessionConfig;

pub struct AppState {
    pub sessions: SessionRegistry,
    cookie_name: String,
    /// Pinned date for tests; `None` means the host's local date
    fixed_today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sessions: SessionRegistry::from_config(config),
            cookie_name: config.cookie_name.clone(),
            fixed_today: None,
        }
    }

    #[cfg(test)]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Find (or start) the session named by the request's cookie.
    pub fn session(&self, headers: &HeaderMap) -> Resolved {
        let id = cookie::read(headers, &self.cookie_name);
        self.sessions.resolve(id.as_deref())
    }

    /// `Set-Cookie` value that keeps the session alive for another idle period
    pub fn session_cookie(&self, session: &Resolved) -> String {
        cookie::build(&self.cookie_name, &session.id, self.sessions.idle_timeout())
    }
}
