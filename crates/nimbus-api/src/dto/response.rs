//! Response DTOs.

use serde::{Deserialize, Serialize};

use nimbus_entity::folder::{Breadcrumb, Folder};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A folder together with its resolved breadcrumb trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderWithPath {
    /// The folder itself.
    #[serde(flatten)]
    pub folder: Folder,
    /// Ancestry trail, root-first, ending with this folder.
    pub path: Vec<Breadcrumb>,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database connectivity.
    pub database: String,
}
