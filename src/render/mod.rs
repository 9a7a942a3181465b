//! HTML for the task page.
//!
//! One page with a variant per [`View`]. The calendar's click behaviour
//! lives in the embedded `calendar.js`.

pub mod assets;
pub mod calendar;

use chrono::{Datelike, NaiveDate};
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::error::Result;
use crate::model::{Projection, View};
use calendar::{format_month, MonthGrid};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Render the full page.
///
/// `month` is only used by the upcoming view and may be any day of the
/// month to show.
pub fn page(projection: &Projection<'_>, month: NaiveDate) -> Result<Markup> {
    let body = match projection.view {
        View::Upcoming => upcoming(projection, month)?,
        _ => task_list(projection),
    };

    Ok(html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Task Manager" }
                link rel="stylesheet" href="/assets/style.css";
            }
            body {
                h1 { "Task Manager" }
                p.nav {
                    a href="/?view=home" { "Home" } " | "
                    a href="/?view=today" { "Today's Tasks" } " | "
                    a href="/?view=all" { "All Tasks" } " | "
                    a href="/?view=upcoming" { "Upcoming Tasks" }
                }
                (body)
            }
        }
    })
}

fn add_form(view: View, default_date: Option<NaiveDate>, heading: &str) -> Markup {
    let date_value = default_date.map(|d| d.to_string());
    html! {
        h2 { (heading) }
        form method="POST" action={ "/?view=" (view.as_str()) } {
            input type="hidden" name="action" value="add";
            input type="text" name="title" placeholder="Task Title" required;
            input type="date" name="task_date" value=[date_value] required;
            button type="submit" { "Add Task" }
        }
    }
}

fn task_list(projection: &Projection<'_>) -> Markup {
    let view = projection.view;
    let heading = match view {
        View::Home => "Due Today".to_string(),
        View::Today => format!("Today's Tasks ({})", projection.today),
        _ => "All Tasks".to_string(),
    };

    html! {
        (add_form(view, Some(projection.today), "Add a Task"))
        h2 { (heading) }
        ul.tasks {
            @if projection.tasks.is_empty() {
                li { "No tasks found!" }
            }
            @for visible in &projection.tasks {
                li {
                    (visible.task.title) " (Date: " (visible.task.date.to_string()) ")"
                    form.inline method="POST" action={ "/?view=" (view.as_str()) } {
                        input type="hidden" name="action" value="delete";
                        input type="hidden" name="task_index" value=(visible.position);
                        button type="submit" { "Delete" }
                    }
                }
            }
        }
    }
}

fn upcoming(projection: &Projection<'_>, month: NaiveDate) -> Result<Markup> {
    let grid = MonthGrid::containing(month);
    let tasks = tasks_json(projection)?;

    Ok(html! {
        (add_form(View::Upcoming, None, "Add a Task for Upcoming Date"))
        h2 { "Upcoming Tasks" }
        p.month-nav {
            a href={ "/?view=upcoming&month=" (format_month(grid.prev())) } { "←" } " "
            strong { (grid.title()) } " "
            a href={ "/?view=upcoming&month=" (format_month(grid.next())) } { "→" }
        }
        div #calendar {
            @for name in WEEKDAYS {
                div.weekday { (name) }
            }
            @for _ in 0..grid.leading_blanks {
                div.blank {}
            }
            @for day in &grid.days {
                @let key = day.to_string();
                div.day.has-task[projection.by_date.contains_key(&key)].today[*day == projection.today]
                    data-date=(key) { (day.day()) }
            }
        }
        div #"task-details" {
            h2 { "Tasks for Selected Day" }
            ul #"task-list" {}
        }
        script #"tasks-data" type="application/json" { (PreEscaped(tasks)) }
        script src="/assets/calendar.js" {}
    })
}

/// Grouped map as JSON that is safe to inline in a `<script>` element
pub fn tasks_json(projection: &Projection<'_>) -> Result<String> {
    let json = serde_json::to_string(&projection.by_date)?;
    // '<' only occurs inside JSON strings, where the escape is equivalent
    Ok(json.replace('<', "\\u003c"))
}
