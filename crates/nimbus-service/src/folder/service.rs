//! Folder CRUD operations with ownership enforcement.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use nimbus_core::error::AppError;
use nimbus_core::traits::ObjectStore;
use nimbus_core::types::FolderQuery;
use nimbus_database::repositories::{FileStore, FolderStore};
use nimbus_entity::folder::{CreateFolder, Folder, UpdateFolder};

use crate::context::RequestContext;

/// Longest accepted folder name, in characters.
pub(crate) const FOLDER_NAME_MAX: usize = 100;

/// Manages folder CRUD operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder persistence.
    pub(crate) folders: Arc<dyn FolderStore>,
    /// File persistence, needed for contained-file cleanup on delete.
    files: Arc<dyn FileStore>,
    /// Object store, for deleting contained files' content.
    objects: Arc<dyn ObjectStore>,
}

/// Request to create a new folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for top level).
    pub parent_id: Option<Uuid>,
}

/// Request to rename or move a folder.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateFolderRequest {
    /// New name, if renaming.
    pub name: Option<String>,
    /// New parent, if moving. `Some(None)` moves to the top level.
    pub parent_id: Option<Option<Uuid>>,
}

/// Validate a folder or file name against the given length cap.
pub(crate) fn validate_name(name: &str, max_len: usize) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Name cannot be empty"));
    }
    if name.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "Name cannot exceed {max_len} characters"
        )));
    }
    Ok(())
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            folders,
            files,
            objects,
        }
    }

    /// Lists the user's folders matching the query.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: &FolderQuery,
    ) -> Result<Vec<Folder>, AppError> {
        self.folders.list(ctx.user_id, query).await
    }

    /// Gets a folder by ID. Folders owned by other users are reported
    /// as not found.
    pub async fn get(&self, ctx: &RequestContext, folder_id: Uuid) -> Result<Folder, AppError> {
        self.folders
            .find_owned(folder_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Creates a new folder, optionally inside an existing one.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> Result<Folder, AppError> {
        validate_name(&req.name, FOLDER_NAME_MAX)?;

        if let Some(parent_id) = req.parent_id {
            // The parent must exist and belong to the caller.
            self.get(ctx, parent_id).await?;
        }

        let folder = self
            .folders
            .create(&CreateFolder {
                name: req.name,
                owner_id: ctx.user_id,
                parent_id: req.parent_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            name = %folder.name,
            "Folder created"
        );
        Ok(folder)
    }

    /// Renames and/or moves a folder.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        req: UpdateFolderRequest,
    ) -> Result<Folder, AppError> {
        let update = UpdateFolder {
            name: req.name,
            parent_id: req.parent_id,
        };
        if update.is_empty() {
            return Err(AppError::validation("No changes provided"));
        }
        if let Some(name) = &update.name {
            validate_name(name, FOLDER_NAME_MAX)?;
        }
        if let Some(Some(new_parent)) = update.parent_id {
            if new_parent == folder_id {
                return Err(AppError::validation("A folder cannot be its own parent"));
            }
            // The destination must exist, belong to the caller, and not
            // sit anywhere under the folder being moved. Its ancestry is
            // resolved with the bounded walk, so a pre-existing cycle
            // surfaces here instead of being extended.
            let ancestry = self.breadcrumbs(ctx, new_parent).await?;
            if ancestry.iter().any(|crumb| crumb.id == folder_id) {
                return Err(AppError::validation(
                    "A folder cannot be moved into its own descendant",
                ));
            }
        }

        let folder = self
            .folders
            .update(folder_id, ctx.user_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            "Folder updated"
        );
        Ok(folder)
    }

    /// Permanently deletes a folder.
    ///
    /// Content of files directly inside the folder is removed from the
    /// object store first, one by one; a storage failure aborts before
    /// any database row is touched. The folder row is then deleted and
    /// the database cascades over nested folders and file rows.
    pub async fn delete(&self, ctx: &RequestContext, folder_id: Uuid) -> Result<(), AppError> {
        self.get(ctx, folder_id).await?;

        let contained = self.files.list_in_folder(folder_id, ctx.user_id).await?;
        for file in &contained {
            self.objects.delete_object(&file.storage_key).await?;
        }

        self.folders.delete(folder_id, ctx.user_id).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            blobs_deleted = contained.len(),
            "Folder deleted"
        );
        Ok(())
    }
}
