//! Task API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::model::{self, AddTaskRequest, DeleteTaskRequest, Rejection, Task, View};

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Task list query parameters
#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    pub view: Option<String>, // "home" | "today" | "upcoming" | "all"
}

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    /// `YYYY-MM-DD`; today when omitted
    pub date: Option<String>,
}

/// A task and where it currently sits in the store
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub position: usize,
    pub title: String,
    pub date: NaiveDate,
}

impl TaskResponse {
    fn new(position: usize, task: Task) -> Self {
        Self {
            position,
            title: task.title,
            date: task.date,
        }
    }
}

/// Error body for rejected mutations
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

// ============================================================================
// Helper functions
// ============================================================================

fn rejection_status(rejection: &Rejection) -> StatusCode {
    match rejection {
        Rejection::NoSuchTask(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn rejection_response(cookie: String, rejection: Rejection) -> Response {
    let body = ErrorResponse {
        error: rejection.code(),
        message: rejection.to_string(),
    };
    (
        rejection_status(&rejection),
        [(header::SET_COOKIE, cookie)],
        Json(body),
    )
        .into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/v1/tasks
/// Projection of the visitor's tasks for a view
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<TaskListQuery>,
) -> Response {
    let session = state.session(&headers);
    let cookie = state.session_cookie(&session);
    let today = state.today();
    let view = View::parse(query.view.as_deref());

    let guard = session.state.lock().await;
    let projection = model::select(&guard.tasks, view, today);
    ([(header::SET_COOKIE, cookie)], Json(projection)).into_response()
}

/// POST /api/v1/tasks
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateTaskRequest>,
) -> Response {
    let session = state.session(&headers);
    let cookie = state.session_cookie(&session);
    let today = state.today();

    let req = match AddTaskRequest::parse(req.title.as_deref(), req.date.as_deref(), today) {
        Ok(req) => req,
        Err(rejection) => return rejection_response(cookie, rejection),
    };

    let mut guard = session.state.lock().await;
    let position = guard.tasks.apply_add(&req);
    tracing::debug!(session = %session.id, position, "task added");
    let task = Task::new(req.title.as_str(), req.date);
    (
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(TaskResponse::new(position, task)),
    )
        .into_response()
}

/// DELETE /api/v1/tasks/{position}
///
/// Positions shift after every delete; clients must re-list before reusing one.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(position): Path<String>,
) -> Response {
    let session = state.session(&headers);
    let cookie = state.session_cookie(&session);

    let req = match DeleteTaskRequest::parse(Some(position.as_str())) {
        Ok(req) => req,
        Err(rejection) => return rejection_response(cookie, rejection),
    };

    let mut guard = session.state.lock().await;
    match guard.tasks.apply_delete(req) {
        Ok(task) => {
            tracing::debug!(session = %session.id, position = req.position, "task deleted");
            (
                [(header::SET_COOKIE, cookie)],
                Json(TaskResponse::new(req.position, task)),
            )
                .into_response()
        }
        Err(rejection) => rejection_response(cookie, rejection),
    }
}
