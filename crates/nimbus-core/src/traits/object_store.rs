use std::time::Duration;

use async_trait::async_trait;

use crate::AppResult;

/// Blob-store operations the services depend on.
///
/// Object content never flows through the server. Uploads and downloads
/// happen through presigned URLs issued here; the only direct operation
/// is deletion.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Presign a PUT for the given key, bound to the declared content type.
    async fn sign_upload(&self, key: &str, content_type: &str, ttl: Duration)
        -> AppResult<String>;

    /// Presign a GET for the given key.
    async fn sign_download(&self, key: &str, ttl: Duration) -> AppResult<String>;

    /// Delete the object at the given key. Deleting a key that does not
    /// exist is not an error.
    async fn delete_object(&self, key: &str) -> AppResult<()>;
}
