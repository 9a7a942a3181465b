//! Web server: HTML page, JSON API and embedded assets

pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the API router
pub fn create_api_router() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Tasks API
        .route(
            "/tasks",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route("/tasks/{position}", delete(handlers::tasks::delete_task))
        .route("/info", get(handlers::info::get_info))
        .layer(cors)
}

/// Create the full router: page, assets and `/api/v1`
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::page::show_page).post(handlers::page::submit_form),
        )
        .route("/assets/{*path}", get(handlers::assets::serve_asset))
        .nest("/api/v1", create_api_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the web server and run until Ctrl+C
pub async fn start_server(host: &str, port: u16, state: Arc<AppState>) -> std::io::Result<()> {
    let app = create_router(state);
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("taskday listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
