//! Presigned upload/download tickets and storage usage.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use nimbus_core::config::StorageConfig;
use nimbus_core::error::AppError;
use nimbus_core::traits::ObjectStore;
use nimbus_database::repositories::FileStore;
use nimbus_entity::storage::StorageUsage;

use crate::context::RequestContext;
use crate::file::service::FILE_NAME_MAX;
use crate::folder::service::validate_name;

/// Issues presigned transfer URLs and reports usage.
#[derive(Debug, Clone)]
pub struct StorageService {
    /// File persistence, for download lookups and usage aggregation.
    files: Arc<dyn FileStore>,
    /// Object store issuing the presigned URLs.
    objects: Arc<dyn ObjectStore>,
    /// TTLs and accounting policy.
    config: StorageConfig,
}

/// Request for a presigned upload URL.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadRequest {
    /// Name the file will be stored under.
    pub file_name: String,
    /// Content type the upload will be bound to.
    pub content_type: String,
}

/// A presigned upload slot. The client PUTs the content to `url`, then
/// registers the file record with `key`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadTicket {
    /// Presigned PUT URL.
    pub url: String,
    /// Object-storage key the URL writes to.
    pub key: String,
    /// How long the URL stays valid.
    pub expires_in_seconds: u64,
}

/// A presigned download for an existing file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DownloadTicket {
    /// Presigned GET URL.
    pub url: String,
    /// The file's current name, for the client to save under.
    pub file_name: String,
    /// How long the URL stays valid.
    pub expires_in_seconds: u64,
}

impl StorageService {
    /// Creates a new storage service.
    pub fn new(
        files: Arc<dyn FileStore>,
        objects: Arc<dyn ObjectStore>,
        config: StorageConfig,
    ) -> Self {
        Self {
            files,
            objects,
            config,
        }
    }

    /// Issues a presigned upload URL under a fresh key.
    ///
    /// The key is namespaced by owner and salted with a random UUID, so
    /// two uploads of the same file name never collide and a key alone
    /// identifies its owner.
    pub async fn sign_upload(
        &self,
        ctx: &RequestContext,
        req: UploadRequest,
    ) -> Result<UploadTicket, AppError> {
        validate_name(&req.file_name, FILE_NAME_MAX)?;
        if req.content_type.trim().is_empty() {
            return Err(AppError::validation("Content type cannot be empty"));
        }

        let key = format!("{}/{}/{}", ctx.user_id, Uuid::new_v4(), req.file_name);
        let ttl = Duration::from_secs(self.config.upload_url_ttl_seconds);
        let url = self.objects.sign_upload(&key, &req.content_type, ttl).await?;

        info!(
            user_id = %ctx.user_id,
            key = %key,
            content_type = %req.content_type,
            "Upload URL issued"
        );
        Ok(UploadTicket {
            url,
            key,
            expires_in_seconds: self.config.upload_url_ttl_seconds,
        })
    }

    /// Issues a presigned download URL for an owned file.
    pub async fn sign_download(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<DownloadTicket, AppError> {
        let file = self
            .files
            .find_owned(file_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let ttl = Duration::from_secs(self.config.download_url_ttl_seconds);
        let url = self.objects.sign_download(&file.storage_key, ttl).await?;

        info!(user_id = %ctx.user_id, file_id = %file_id, "Download URL issued");
        Ok(DownloadTicket {
            url,
            file_name: file.name,
            expires_in_seconds: self.config.download_url_ttl_seconds,
        })
    }

    /// Reports the user's storage footprint. Whether trashed files
    /// count against it is a configuration decision; they occupy real
    /// space until permanently deleted, so by default they do.
    pub async fn usage(&self, ctx: &RequestContext) -> Result<StorageUsage, AppError> {
        self.files
            .usage(ctx.user_id, self.config.usage_includes_trashed)
            .await
    }
}
