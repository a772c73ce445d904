//! Route definitions for the Nimbus Drive HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(folder_routes())
        .merge(file_routes())
        .merge(storage_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Folder CRUD and breadcrumb path.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", get(handlers::folder::list_folders))
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/{id}", get(handlers::folder::get_folder))
        .route("/folders/{id}", put(handlers::folder::update_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
        .route("/folders/{id}/path", get(handlers::folder::get_folder_path))
}

/// File CRUD and trash lifecycle.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route("/files", post(handlers::file::register_file))
        .route("/files/{id}", get(handlers::file::get_file))
        .route("/files/{id}", put(handlers::file::update_file))
        .route("/files/{id}", delete(handlers::file::delete_file))
        .route("/files/{id}/trash", post(handlers::file::trash_file))
        .route("/files/{id}/restore", post(handlers::file::restore_file))
}

/// Presigned transfers and usage.
fn storage_routes() -> Router<AppState> {
    Router::new()
        .route("/storage/upload-url", post(handlers::storage::upload_url))
        .route(
            "/storage/download-url/{file_id}",
            get(handlers::storage::download_url),
        )
        .route("/storage/usage", get(handlers::storage::usage))
}

/// Health endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
