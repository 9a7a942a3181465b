use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::request::{AddTaskRequest, DeleteTaskRequest, Rejection};

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Trimmed, never empty
    pub title: String,
    /// Due date (serialized as `YYYY-MM-DD`)
    pub date: NaiveDate,
}

impl Task {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            date,
        }
    }
}

/// Ordered tasks of one session.
///
/// A task has no identity besides its position. Removing an entry shifts
/// every later entry down by one, so positions handed out before a removal
/// must not be reused after it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Task> {
        self.tasks.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Append a task, returning its position.
    ///
    /// Blank titles are ignored (`None`). Missing dates default to `today`.
    pub fn add(&mut self, title: &str, date: Option<NaiveDate>, today: NaiveDate) -> Option<usize> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        self.tasks.push(Task::new(title, date.unwrap_or(today)));
        Some(self.tasks.len() - 1)
    }

    /// Remove the task at `position` and close the gap.
    ///
    /// Out-of-range positions leave the store untouched.
    pub fn remove(&mut self, position: usize) -> Option<Task> {
        if position < self.tasks.len() {
            Some(self.tasks.remove(position))
        } else {
            None
        }
    }

    /// Apply an already validated add request, returning the new position.
    ///
    /// [`AddTaskRequest`] only carries trimmed, non-blank titles, so this
    /// always appends.
    pub fn apply_add(&mut self, req: &AddTaskRequest) -> usize {
        self.tasks.push(Task::new(req.title.as_str(), req.date));
        self.tasks.len() - 1
    }

    /// Apply an already validated delete request.
    pub fn apply_delete(&mut self, req: DeleteTaskRequest) -> Result<Task, Rejection> {
        self.remove(req.position).ok_or(Rejection::NoSuchTask(req.position))
    }
}

impl<'a> IntoIterator for &'a TaskStore {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
