//! Validation of incoming task mutations.
//!
//! Form fields and JSON bodies arrive as loose strings. They are turned into
//! typed requests here, before they reach a [`TaskStore`](super::TaskStore).

use chrono::NaiveDate;
use thiserror::Error;

/// ISO 8601 calendar date, as sent by `<input type="date">`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a mutation was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    #[error("invalid task position: {0:?}")]
    InvalidPosition(String),

    #[error("no task at position {0}")]
    NoSuchTask(usize),
}

impl Rejection {
    /// Stable reason code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::EmptyTitle => "empty_title",
            Rejection::InvalidDate(_) => "invalid_date",
            Rejection::InvalidPosition(_) => "invalid_position",
            Rejection::NoSuchTask(_) => "no_such_task",
        }
    }
}

/// Task title that is known to be non-blank (and already trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn parse(raw: &str) -> Result<Self, Rejection> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Rejection::EmptyTitle);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    pub title: Title,
    pub date: NaiveDate,
}

impl AddTaskRequest {
    /// Missing or blank dates fall back to `today`. A date that is present
    /// but not a real calendar day is rejected rather than stored verbatim.
    pub fn parse(
        title: Option<&str>,
        date: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, Rejection> {
        let title = Title::parse(title.unwrap_or_default())?;
        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => parse_date(raw)?,
            None => today,
        };
        Ok(Self { title, date })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTaskRequest {
    pub position: usize,
}

impl DeleteTaskRequest {
    /// Only plain decimal digits are accepted (no sign). Whether the
    /// position exists is decided by the store.
    pub fn parse(position: Option<&str>) -> Result<Self, Rejection> {
        let raw = position.unwrap_or_default().trim();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Rejection::InvalidPosition(raw.to_string()));
        }
        raw.parse::<usize>()
            .map(|position| Self { position })
            .map_err(|_| Rejection::InvalidPosition(raw.to_string()))
    }
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, Rejection> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| Rejection::InvalidDate(raw.to_string()))
}
