use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::task::{Task, TaskStore};

/// Requested display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Landing page: today's tasks plus the add form
    #[default]
    Home,
    Today,
    /// Month calendar
    Upcoming,
    /// Unfiltered list. Also what unrecognized view names map to.
    All,
}

impl View {
    /// Missing → `Home`; unknown names fall back to the unfiltered listing.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("home") => View::Home,
            Some("today") => View::Today,
            Some("upcoming") => View::Upcoming,
            Some(_) => View::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Today => "today",
            View::Upcoming => "upcoming",
            View::All => "all",
        }
    }

    /// Whether the flat list only holds tasks due today
    pub fn is_today_only(&self) -> bool {
        matches!(self, View::Home | View::Today)
    }
}

/// A task as seen in a rendered list.
///
/// `position` indexes the full store, not the filtered list, so delete
/// controls keep addressing the right entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleTask<'a> {
    pub position: usize,
    #[serde(flatten)]
    pub task: &'a Task,
}

/// Date (`YYYY-MM-DD`) → titles, in store order
pub type TasksByDate = BTreeMap<String, Vec<String>>;

/// Read-only data needed to render one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection<'a> {
    pub view: View,
    pub today: NaiveDate,
    pub tasks: Vec<VisibleTask<'a>>,
    pub by_date: TasksByDate,
}

/// Project the store for `view`.
///
/// The grouped map always covers every task, whatever the view.
pub fn select(store: &TaskStore, view: View, today: NaiveDate) -> Projection<'_> {
    let tasks = store
        .iter()
        .enumerate()
        .filter(|(_, task)| !view.is_today_only() || task.date == today)
        .map(|(position, task)| VisibleTask { position, task })
        .collect();

    Projection {
        view,
        today,
        tasks,
        by_date: group_by_date(store),
    }
}

/// Single pass over the store; no sorting within a day.
pub fn group_by_date(store: &TaskStore) -> TasksByDate {
    let mut by_date = TasksByDate::new();
    for task in store {
        by_date
            .entry(task.date.to_string())
            .or_default()
            .push(task.title.clone());
    }
    by_date
}
