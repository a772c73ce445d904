//! Repository traits and their PostgreSQL implementations.
//!
//! Services depend on the traits defined here rather than the concrete
//! repositories, so the persistence layer can be swapped in tests.
//! Every query an implementation runs must scope by owner: a row
//! belonging to another user is indistinguishable from an absent row.

use async_trait::async_trait;
use uuid::Uuid;

use nimbus_core::types::{FileQuery, FolderQuery};
use nimbus_core::AppResult;
use nimbus_entity::file::{CreateFile, File, UpdateFile};
use nimbus_entity::folder::{CreateFolder, Folder, UpdateFolder};
use nimbus_entity::session::Session;
use nimbus_entity::storage::StorageUsage;

pub mod file;
pub mod folder;
pub mod session;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use session::SessionRepository;

/// Persistence operations for folders.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by ID, scoped to its owner.
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>>;

    /// List the owner's folders matching the query.
    async fn list(&self, owner_id: Uuid, query: &FolderQuery) -> AppResult<Vec<Folder>>;

    /// Create a folder.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Apply a partial update. Returns `None` when no owned row matched.
    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: &UpdateFolder,
    ) -> AppResult<Option<Folder>>;

    /// Delete a folder row. Contained rows go with it via cascade.
    /// Returns whether an owned row was deleted.
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool>;
}

/// Persistence operations for files.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a file by ID, scoped to its owner.
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>>;

    /// List the owner's files matching the query.
    async fn list(&self, owner_id: Uuid, query: &FileQuery) -> AppResult<Vec<File>>;

    /// Every file directly inside a folder, trashed or not.
    async fn list_in_folder(&self, folder_id: Uuid, owner_id: Uuid) -> AppResult<Vec<File>>;

    /// Register an uploaded file.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    /// Apply a partial update. Returns `None` when no owned row matched.
    async fn update(&self, id: Uuid, owner_id: Uuid, update: &UpdateFile)
        -> AppResult<Option<File>>;

    /// Move a file into or out of the trash. Returns `None` when no
    /// owned row matched.
    async fn set_trashed(&self, id: Uuid, owner_id: Uuid, trashed: bool)
        -> AppResult<Option<File>>;

    /// Delete a file row. Returns whether an owned row was deleted.
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool>;

    /// Aggregate size and count of the owner's files.
    async fn usage(&self, owner_id: Uuid, include_trashed: bool) -> AppResult<StorageUsage>;
}

/// Session lookup for request authentication.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a session by its bearer token.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>>;
}
