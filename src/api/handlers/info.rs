//! Server info handler

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    /// The date "today" views filter on
    pub today: NaiveDate,
    pub active_sessions: usize,
}

/// GET /api/v1/info
pub async fn get_info(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    Json(InfoResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        today: state.today(),
        active_sessions: state.sessions.len(),
    })
}
