//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use nimbus_core::config::AppConfig;
use nimbus_database::repositories::SessionStore;
use nimbus_database::DatabasePool;
use nimbus_service::file::FileService;
use nimbus_service::folder::FolderService;
use nimbus_service::storage::StorageService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Database pool, for health checks.
    pub db: DatabasePool,
    /// Session lookup for request authentication.
    pub sessions: Arc<dyn SessionStore>,
    /// Folder service.
    pub folder_service: Arc<FolderService>,
    /// File service.
    pub file_service: Arc<FileService>,
    /// Storage service.
    pub storage_service: Arc<StorageService>,
}
