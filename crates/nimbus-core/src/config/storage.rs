//! Object-store configuration.

use serde::{Deserialize, Serialize};

/// S3-compatible object-store configuration (AWS, R2, MinIO).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Endpoint URL (empty for plain AWS S3).
    #[serde(default)]
    pub endpoint: String,
    /// Region name.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket name.
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Lifetime of presigned upload URLs in seconds.
    #[serde(default = "default_url_ttl")]
    pub upload_url_ttl_seconds: u64,
    /// Lifetime of presigned download URLs in seconds.
    #[serde(default = "default_url_ttl")]
    pub download_url_ttl_seconds: u64,
    /// Whether trashed files count toward the reported storage usage.
    ///
    /// Trashed files still occupy bucket space, so they count by default;
    /// the flag exists to make that choice explicit rather than buried in
    /// the aggregation query.
    #[serde(default = "default_true")]
    pub usage_includes_trashed: bool,
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_url_ttl() -> u64 {
    3600
}

fn default_true() -> bool {
    true
}
