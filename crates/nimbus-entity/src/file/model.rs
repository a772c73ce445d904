//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file record. The content itself lives in object storage under
/// `storage_key`; this row carries the metadata and lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// File name as shown to the user.
    pub name: String,
    /// The file owner.
    pub owner_id: Uuid,
    /// Containing folder (null for top-level files).
    pub folder_id: Option<Uuid>,
    /// Size in bytes, as declared at upload time.
    pub size: i64,
    /// Declared MIME type.
    pub mime_type: String,
    /// Object-storage key. Immutable for the life of the record.
    pub storage_key: String,
    /// Whether the user has starred this file.
    pub is_starred: bool,
    /// Whether the file is in the trash.
    pub is_trashed: bool,
    /// When the file was moved to the trash.
    pub trashed_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to register an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// File name.
    pub name: String,
    /// The file owner.
    pub owner_id: Uuid,
    /// Containing folder (None for top level).
    pub folder_id: Option<Uuid>,
    /// Size in bytes.
    pub size: i64,
    /// Declared MIME type.
    pub mime_type: String,
    /// Object-storage key the content was uploaded under.
    pub storage_key: String,
}

/// Partial update for an existing file.
///
/// `folder_id` carries three states: not provided (keep current),
/// `Some(None)` (move to top level), `Some(Some(id))` (move into a folder).
/// The storage key and size are never updatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFile {
    /// New file name, if renaming.
    pub name: Option<String>,
    /// New containing folder, if moving.
    pub folder_id: Option<Option<Uuid>>,
    /// New starred state.
    pub is_starred: Option<bool>,
}

impl UpdateFile {
    /// Whether the update carries any change at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.folder_id.is_none() && self.is_starred.is_none()
    }
}
