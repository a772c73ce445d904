//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in the drive hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Parent folder ID (null for top-level folders).
    pub parent_id: Option<Uuid>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this folder sits at the top level (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Parent folder (None for top level).
    pub parent_id: Option<Uuid>,
}

/// Partial update for an existing folder.
///
/// `parent_id` carries three states: not provided (keep current),
/// `Some(None)` (move to top level), `Some(Some(id))` (move into a folder).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolder {
    /// New folder name, if renaming.
    pub name: Option<String>,
    /// New parent, if moving.
    pub parent_id: Option<Option<Uuid>>,
}

impl UpdateFolder {
    /// Whether the update carries any change at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none()
    }
}
