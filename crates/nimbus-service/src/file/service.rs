//! File CRUD and lifecycle operations with ownership enforcement.
//!
//! Files move through three states: active, trashed, and gone. Trashing
//! is a reversible metadata flip; permanent deletion removes the object
//! content first and only then the record, so a storage failure never
//! leaves an orphaned blob behind a missing row.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use nimbus_core::error::AppError;
use nimbus_core::traits::ObjectStore;
use nimbus_core::types::FileQuery;
use nimbus_database::repositories::{FileStore, FolderStore};
use nimbus_entity::file::{CreateFile, File, UpdateFile};

use crate::context::RequestContext;
use crate::folder::service::validate_name;

/// Longest accepted file name, in characters.
pub(crate) const FILE_NAME_MAX: usize = 255;

/// Manages file metadata and lifecycle.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File persistence.
    files: Arc<dyn FileStore>,
    /// Folder persistence, for validating move targets.
    folders: Arc<dyn FolderStore>,
    /// Object store, for permanent deletion.
    objects: Arc<dyn ObjectStore>,
}

/// Request to register a file after its content has been uploaded.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterFileRequest {
    /// File name.
    pub name: String,
    /// Containing folder (None for top level).
    pub folder_id: Option<Uuid>,
    /// Size in bytes.
    pub size: i64,
    /// Declared MIME type.
    pub mime_type: String,
    /// Object-storage key the content was uploaded under.
    pub storage_key: String,
}

/// Request to rename, move, or star a file.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateFileRequest {
    /// New name, if renaming.
    pub name: Option<String>,
    /// New containing folder, if moving. `Some(None)` moves to the
    /// top level.
    pub folder_id: Option<Option<Uuid>>,
    /// New starred state.
    pub is_starred: Option<bool>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            files,
            folders,
            objects,
        }
    }

    /// Lists the user's files matching the query.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: &FileQuery,
    ) -> Result<Vec<File>, AppError> {
        self.files.list(ctx.user_id, query).await
    }

    /// Gets a file by ID. Files owned by other users are reported as
    /// not found.
    pub async fn get(&self, ctx: &RequestContext, file_id: Uuid) -> Result<File, AppError> {
        self.files
            .find_owned(file_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Registers an uploaded file. The content must already sit in the
    /// object store under `storage_key`; registering the same key twice
    /// is a conflict.
    pub async fn register(
        &self,
        ctx: &RequestContext,
        req: RegisterFileRequest,
    ) -> Result<File, AppError> {
        validate_name(&req.name, FILE_NAME_MAX)?;
        if req.size < 0 {
            return Err(AppError::validation("File size cannot be negative"));
        }
        if req.storage_key.trim().is_empty() {
            return Err(AppError::validation("Storage key cannot be empty"));
        }
        if let Some(folder_id) = req.folder_id {
            self.folders
                .find_owned(folder_id, ctx.user_id)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
        }

        let file = self
            .files
            .create(&CreateFile {
                name: req.name,
                owner_id: ctx.user_id,
                folder_id: req.folder_id,
                size: req.size,
                mime_type: req.mime_type,
                storage_key: req.storage_key,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            size = file.size,
            "File registered"
        );
        Ok(file)
    }

    /// Renames, moves, or stars a file.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        req: UpdateFileRequest,
    ) -> Result<File, AppError> {
        let update = UpdateFile {
            name: req.name,
            folder_id: req.folder_id,
            is_starred: req.is_starred,
        };
        if update.is_empty() {
            return Err(AppError::validation("No changes provided"));
        }
        if let Some(name) = &update.name {
            validate_name(name, FILE_NAME_MAX)?;
        }
        if let Some(Some(folder_id)) = update.folder_id {
            self.folders
                .find_owned(folder_id, ctx.user_id)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
        }

        let file = self
            .files
            .update(file_id, ctx.user_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        info!(user_id = %ctx.user_id, file_id = %file.id, "File updated");
        Ok(file)
    }

    /// Moves a file to the trash. Trashing an already-trashed file just
    /// refreshes its trash timestamp.
    pub async fn trash(&self, ctx: &RequestContext, file_id: Uuid) -> Result<File, AppError> {
        let file = self
            .files
            .set_trashed(file_id, ctx.user_id, true)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        info!(user_id = %ctx.user_id, file_id = %file.id, "File trashed");
        Ok(file)
    }

    /// Restores a file from the trash. Restoring an active file is a
    /// no-op.
    pub async fn restore(&self, ctx: &RequestContext, file_id: Uuid) -> Result<File, AppError> {
        let file = self
            .files
            .set_trashed(file_id, ctx.user_id, false)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        info!(user_id = %ctx.user_id, file_id = %file.id, "File restored");
        Ok(file)
    }

    /// Permanently deletes a file: content first, record second. A
    /// storage failure leaves the record in place so the delete can be
    /// retried.
    pub async fn delete(&self, ctx: &RequestContext, file_id: Uuid) -> Result<(), AppError> {
        let file = self.get(ctx, file_id).await?;

        self.objects.delete_object(&file.storage_key).await?;
        self.files.delete(file_id, ctx.user_id).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            storage_key = %file.storage_key,
            "File permanently deleted"
        );
        Ok(())
    }
}
