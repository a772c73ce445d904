//! S3-compatible object store backed by the AWS SDK.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use nimbus_core::config::StorageConfig;
use nimbus_core::error::{AppError, ErrorKind};
use nimbus_core::traits::ObjectStore;
use nimbus_core::AppResult;

/// Object store against any S3-compatible endpoint (MinIO, R2, AWS).
///
/// Uses path-style addressing so bucket names never have to resolve
/// through DNS, which is what MinIO and most self-hosted endpoints expect.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client from configuration with static credentials.
    pub async fn connect(config: &StorageConfig) -> AppResult<Self> {
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 object store"
        );

        let aws_config = aws_config::from_env()
            .endpoint_url(&config.endpoint)
            .region(Region::new(config.region.clone()))
            .credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "static",
            ))
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        })
    }

    /// The bucket this store operates on.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn presigning_config(ttl: Duration) -> AppResult<PresigningConfig> {
        PresigningConfig::expires_in(ttl).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid presign TTL {ttl:?}"),
                e,
            )
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn sign_upload(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> AppResult<String> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(Self::presigning_config(ttl)?)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to presign upload for key '{key}'"),
                    e,
                )
            })?;

        debug!(key, ttl_seconds = ttl.as_secs(), "Presigned upload URL");
        Ok(request.uri().to_string())
    }

    async fn sign_download(&self, key: &str, ttl: Duration) -> AppResult<String> {
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(Self::presigning_config(ttl)?)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to presign download for key '{key}'"),
                    e,
                )
            })?;

        debug!(key, ttl_seconds = ttl.as_secs(), "Presigned download URL");
        Ok(request.uri().to_string())
    }

    async fn delete_object(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object '{key}'"),
                    e,
                )
            })?;

        debug!(key, "Deleted object");
        Ok(())
    }
}
