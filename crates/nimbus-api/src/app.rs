//! Application wiring: repositories, services, and shared state.

use std::sync::Arc;

use nimbus_core::config::AppConfig;
use nimbus_core::traits::ObjectStore;
use nimbus_database::repositories::{
    FileRepository, FileStore, FolderRepository, FolderStore, SessionRepository, SessionStore,
};
use nimbus_database::DatabasePool;
use nimbus_service::file::FileService;
use nimbus_service::folder::FolderService;
use nimbus_service::storage::StorageService;

use crate::state::AppState;

/// Assemble the full dependency graph into an `AppState`.
pub fn build_state(config: AppConfig, db: DatabasePool, objects: Arc<dyn ObjectStore>) -> AppState {
    let pool = db.pool().clone();
    let folders: Arc<dyn FolderStore> = Arc::new(FolderRepository::new(pool.clone()));
    let files: Arc<dyn FileStore> = Arc::new(FileRepository::new(pool.clone()));
    let sessions: Arc<dyn SessionStore> = Arc::new(SessionRepository::new(pool));

    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&folders),
        Arc::clone(&files),
        Arc::clone(&objects),
    ));
    let file_service = Arc::new(FileService::new(
        Arc::clone(&files),
        Arc::clone(&folders),
        Arc::clone(&objects),
    ));
    let storage_service = Arc::new(StorageService::new(
        Arc::clone(&files),
        Arc::clone(&objects),
        config.storage.clone(),
    ));

    AppState {
        config: Arc::new(config),
        db,
        sessions,
        folder_service,
        file_service,
        storage_service,
    }
}
