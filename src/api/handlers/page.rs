//! HTML page handlers (`GET /`, `POST /`)

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Form, Query, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::model::{self, AddTaskRequest, DeleteTaskRequest, Rejection, Task, TaskStore, View};
use crate::render::{self, calendar};

/// Page query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub view: Option<String>,
    /// `YYYY-MM`, upcoming view only
    pub month: Option<String>,
}

/// Form body shared by the add and delete controls
#[derive(Debug, Default, Deserialize)]
pub struct TaskForm {
    pub action: Option<String>,
    pub title: Option<String>,
    pub task_date: Option<String>,
    pub task_index: Option<String>,
}

/// What a form submission did to the store
#[derive(Debug, PartialEq, Eq)]
pub enum FormOutcome {
    Added(usize),
    Deleted(Task),
    /// No recognised action
    Ignored,
}

/// Apply at most one mutation described by `form`.
pub fn apply_form(
    store: &mut TaskStore,
    form: &TaskForm,
    today: NaiveDate,
) -> Result<FormOutcome, Rejection> {
    match form.action.as_deref() {
        Some("add") => {
            let req =
                AddTaskRequest::parse(form.title.as_deref(), form.task_date.as_deref(), today)?;
            Ok(FormOutcome::Added(store.apply_add(&req)))
        }
        Some("delete") => {
            let req = DeleteTaskRequest::parse(form.task_index.as_deref())?;
            Ok(FormOutcome::Deleted(store.apply_delete(req)?))
        }
        _ => Ok(FormOutcome::Ignored),
    }
}

/// Normalised `/?view=…` URL to come back to after a submission
fn page_location(query: &PageQuery) -> String {
    let view = View::parse(query.view.as_deref());
    let month = query.month.as_deref().and_then(calendar::parse_month);
    match (view, month) {
        (View::Upcoming, Some(month)) => format!(
            "/?view={}&month={}",
            view.as_str(),
            calendar::format_month(month)
        ),
        _ => format!("/?view={}", view.as_str()),
    }
}

/// Query parameters that fail to deserialize (e.g. a repeated `view`) fall
/// back to the home view.
fn page_query(query: Result<Query<PageQuery>, QueryRejection>) -> PageQuery {
    match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!("query ignored: {}", rejection.body_text());
            PageQuery::default()
        }
    }
}

/// A body that is not a readable form counts as no action at all.
fn task_form(form: Result<Form<TaskForm>, FormRejection>) -> TaskForm {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("form ignored: {}", rejection.body_text());
            TaskForm::default()
        }
    }
}

/// GET /
pub async fn show_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Response {
    let query = page_query(query);
    let session = state.session(&headers);
    let cookie = state.session_cookie(&session);
    let today = state.today();

    let view = View::parse(query.view.as_deref());
    let month = query
        .month
        .as_deref()
        .and_then(calendar::parse_month)
        .unwrap_or(today);

    let guard = session.state.lock().await;
    let projection = model::select(&guard.tasks, view, today);
    match render::page(&projection, month) {
        Ok(markup) => ([(header::SET_COOKIE, cookie)], Html(markup.into_string())).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// POST /
///
/// Bad input is dropped silently; the visitor just sees the page again.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<PageQuery>, QueryRejection>,
    form: Result<Form<TaskForm>, FormRejection>,
) -> Response {
    let query = page_query(query);
    let form = task_form(form);
    let session = state.session(&headers);
    let cookie = state.session_cookie(&session);
    let today = state.today();

    {
        let mut guard = session.state.lock().await;
        match apply_form(&mut guard.tasks, &form, today) {
            Ok(FormOutcome::Added(position)) => {
                tracing::debug!(session = %session.id, position, "task added");
            }
            Ok(FormOutcome::Deleted(task)) => {
                tracing::debug!(session = %session.id, title = %task.title, "task deleted");
            }
            Ok(FormOutcome::Ignored) => {}
            Err(rejection) => {
                tracing::debug!(session = %session.id, reason = rejection.code(), "form ignored: {}", rejection);
            }
        }
    }

    (
        [(header::SET_COOKIE, cookie)],
        Redirect::to(&page_location(&query)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::SessionConfig;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{HeaderValue, Request, Uri};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn form(pairs: &[(&str, &str)]) -> TaskForm {
        let mut f = TaskForm::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "action" => f.action = v,
                "title" => f.title = v,
                "task_date" => f.task_date = v,
                "task_index" => f.task_index = v,
                _ => unreachable!(),
            }
        }
        f
    }

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(&SessionConfig::default()).with_today(day("2024-01-01")))
    }

    fn session_id(resp: &Response) -> String {
        let value = resp.headers()[header::SET_COOKIE].to_str().unwrap();
        let pair = value.split(';').next().unwrap();
        pair.split_once('=').unwrap().1.to_string()
    }

    fn cookie_headers(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("taskday_session={}", id)).unwrap(),
        );
        headers
    }

    async fn body_text(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_apply_form_add_and_delete() {
        let today = day("2024-01-01");
        let mut store = TaskStore::new();

        let added = apply_form(&mut store, &form(&[("action", "add"), ("title", "A")]), today);
        assert_eq!(added, Ok(FormOutcome::Added(0)));
        apply_form(&mut store, &form(&[("action", "add"), ("title", "B")]), today).unwrap();

        let deleted = apply_form(
            &mut store,
            &form(&[("action", "delete"), ("task_index", "0")]),
            today,
        );
        assert_eq!(deleted, Ok(FormOutcome::Deleted(Task::new("A", today))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_apply_form_rejections_leave_store_unchanged() {
        let today = day("2024-01-01");
        let mut store = TaskStore::new();
        store.add("keep", None, today);

        let cases = [
            form(&[("action", "add"), ("title", "  ")]),
            form(&[("action", "add"), ("title", "x"), ("task_date", "2024-02-30")]),
            form(&[("action", "delete"), ("task_index", "-1")]),
            form(&[("action", "delete"), ("task_index", "7")]),
            form(&[("action", "delete")]),
        ];
        for case in &cases {
            assert!(apply_form(&mut store, case, today).is_err());
        }
        assert_eq!(
            apply_form(&mut store, &form(&[("action", "rename")]), today),
            Ok(FormOutcome::Ignored)
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_page_location() {
        let q = |view: Option<&str>, month: Option<&str>| PageQuery {
            view: view.map(String::from),
            month: month.map(String::from),
        };
        assert_eq!(page_location(&q(None, None)), "/?view=home");
        assert_eq!(page_location(&q(Some("today"), Some("2024-02"))), "/?view=today");
        assert_eq!(
            page_location(&q(Some("upcoming"), Some("2024-02"))),
            "/?view=upcoming&month=2024-02"
        );
        assert_eq!(
            page_location(&q(Some("upcoming"), Some("\"><script>"))),
            "/?view=upcoming"
        );
        assert_eq!(page_location(&q(Some("<x>"), None)), "/?view=all");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_add_then_view_round_trip() {
        let state = test_state();

        let first = show_page(
            State(state.clone()),
            HeaderMap::new(),
            Ok(Query(PageQuery::default())),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);
        let id = session_id(&first);
        assert!(body_text(first).await.contains("No tasks found!"));

        let posted = submit_form(
            State(state.clone()),
            cookie_headers(&id),
            Ok(Query(PageQuery {
                view: Some("today".into()),
                month: None,
            })),
            Ok(Form(form(&[
                ("action", "add"),
                ("title", "Buy milk"),
                ("task_date", "2024-01-01"),
            ]))),
        )
        .await;
        assert_eq!(posted.status(), StatusCode::SEE_OTHER);
        assert_eq!(posted.headers()[header::LOCATION], "/?view=today");
        assert_eq!(session_id(&posted), id);

        let page = show_page(
            State(state.clone()),
            cookie_headers(&id),
            Ok(Query(PageQuery {
                view: Some("today".into()),
                month: None,
            })),
        )
        .await;
        let html = body_text(page).await;
        assert!(html.contains("Buy milk (Date: 2024-01-01)"));

        // a different visitor sees nothing
        let other = show_page(State(state), HeaderMap::new(), Ok(Query(PageQuery::default()))).await;
        assert!(!body_text(other).await.contains("Buy milk"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_delete_via_form() {
        let state = test_state();
        let session = state.sessions.resolve(None);
        {
            let mut guard = session.state.lock().await;
            for t in ["A", "B", "C"] {
                guard.tasks.add(t, None, day("2024-01-01"));
            }
        }

        let resp = submit_form(
            State(state.clone()),
            cookie_headers(&session.id),
            Ok(Query(PageQuery::default())),
            Ok(Form(form(&[("action", "delete"), ("task_index", "1")]))),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let guard = session.state.lock().await;
        let titles: Vec<&str> = guard.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_upcoming_page_for_requested_month() {
        let state = test_state();
        let resp = show_page(
            State(state),
            HeaderMap::new(),
            Ok(Query(PageQuery {
                view: Some("upcoming".into()),
                month: Some("2024-03".into()),
            })),
        )
        .await;
        let html = body_text(resp).await;
        assert!(html.contains("March 2024"));
        assert!(html.contains("id=\"tasks-data\""));
    }

    async fn form_from(
        content_type: Option<&str>,
        body: &str,
    ) -> Result<Form<TaskForm>, FormRejection> {
        let mut req = Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            req = req.header(header::CONTENT_TYPE, ct);
        }
        let req = req.body(Body::from(body.to_string())).unwrap();
        Form::<TaskForm>::from_request(req, &()).await
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_unreadable_query_renders_home() {
        let state = test_state();
        let uri: Uri = "/?view=all&view=upcoming".parse().unwrap();
        let query = Query::<PageQuery>::try_from_uri(&uri);
        assert!(query.is_err());

        let resp = show_page(State(state), HeaderMap::new(), query).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("<h2>Due Today</h2>"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_unreadable_form_is_ignored() {
        let state = test_state();
        let session = state.sessions.resolve(None);
        session.state.lock().await.tasks.add("keep", None, day("2024-01-01"));

        let bodies = [
            (
                Some("application/x-www-form-urlencoded"),
                "action=delete&task_index=0&task_index=0",
            ),
            (None, "action=delete&task_index=0"),
        ];
        for (content_type, body) in bodies {
            let form = form_from(content_type, body).await;
            assert!(form.is_err());

            let uri: Uri = "/?view=today&view=all".parse().unwrap();
            let resp = submit_form(
                State(state.clone()),
                cookie_headers(&session.id),
                Query::<PageQuery>::try_from_uri(&uri),
                form,
            )
            .await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            assert_eq!(resp.headers()[header::LOCATION], "/?view=home");
        }

        assert_eq!(session.state.lock().await.tasks.len(), 1);
    }
}
