//! Embedded static files

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::render::assets;

/// GET /assets/{*path}
pub async fn serve_asset(Path(path): Path<String>) -> Response {
    match assets::get(&path) {
        Some(asset) => ([(header::CONTENT_TYPE, asset.mime)], asset.data).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
