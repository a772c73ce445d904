//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use nimbus_core::error::AppError;
use nimbus_core::types::{
    FileClass, FileQuery, FileSortKey, FolderQuery, FolderScope, FolderSortKey, SortDirection,
};

/// Run validator-derived checks and flatten failures into one message.
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), AppError> {
    dto.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// Distinguishes "field absent" from "field set to null". Wraps the
/// deserialized value in an extra `Some`; combined with
/// `#[serde(default)]`, an absent field stays `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parse a folder scope query parameter: absent means unscoped, the
/// literal `root` means top-level only, anything else must be a UUID.
pub fn parse_scope(raw: Option<&str>) -> Result<FolderScope, AppError> {
    match raw {
        None => Ok(FolderScope::Any),
        Some("root") => Ok(FolderScope::Root),
        Some(value) => value
            .parse::<Uuid>()
            .map(FolderScope::In)
            .map_err(|_| AppError::validation(format!("Invalid folder id '{value}'"))),
    }
}

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderBody {
    /// Folder name.
    #[validate(length(min = 1, max = 100, message = "Folder name is required"))]
    pub name: String,
    /// Parent folder ID (null or absent for top level).
    pub parent_id: Option<Uuid>,
}

/// Update folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateFolderBody {
    /// New name, if renaming.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New parent, if moving; explicit null moves to the top level.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
}

/// Register file request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterFileBody {
    /// File name.
    #[validate(length(min = 1, max = 255, message = "File name is required"))]
    pub name: String,
    /// Containing folder ID (null or absent for top level).
    pub folder_id: Option<Uuid>,
    /// Size in bytes.
    #[validate(range(min = 0, message = "Size cannot be negative"))]
    pub size: i64,
    /// Declared MIME type.
    #[validate(length(min = 1, message = "MIME type is required"))]
    pub mime_type: String,
    /// Object-storage key the content was uploaded under.
    #[validate(length(min = 1, message = "Storage key is required"))]
    pub storage_key: String,
}

/// Update file request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateFileBody {
    /// New name, if renaming.
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// New containing folder, if moving; explicit null moves to the
    /// top level.
    #[serde(default, deserialize_with = "double_option")]
    pub folder_id: Option<Option<Uuid>>,
    /// New starred state.
    pub is_starred: Option<bool>,
}

/// Presigned upload URL request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadUrlBody {
    /// Name the file will be stored under.
    #[validate(length(min = 1, max = 255, message = "File name is required"))]
    pub file_name: String,
    /// Content type the upload will be bound to.
    #[validate(length(min = 1, message = "Content type is required"))]
    pub content_type: String,
}

/// Query parameters for listing files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilesParams {
    /// Folder scope: absent, `root`, or a folder UUID.
    pub folder_id: Option<String>,
    /// Restrict to starred files.
    pub starred: Option<bool>,
    /// Show the trash view instead of active files.
    pub trashed: Option<bool>,
    /// Substring name search.
    pub search: Option<String>,
    /// MIME classification filter.
    pub file_type: Option<FileClass>,
    /// Sort column.
    pub sort_by: Option<FileSortKey>,
    /// Sort direction.
    pub sort_order: Option<SortDirection>,
}

impl ListFilesParams {
    /// Convert into the domain query, applying defaults.
    pub fn into_query(self) -> Result<FileQuery, AppError> {
        let defaults = FileQuery::default();
        Ok(FileQuery {
            scope: parse_scope(self.folder_id.as_deref())?,
            starred: self.starred.unwrap_or(defaults.starred),
            trashed: self.trashed.unwrap_or(defaults.trashed),
            search: self.search,
            file_type: self.file_type.unwrap_or(defaults.file_type),
            sort_by: self.sort_by.unwrap_or(defaults.sort_by),
            sort_order: self.sort_order.unwrap_or(defaults.sort_order),
        })
    }
}

/// Query parameters for listing folders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFoldersParams {
    /// Parent scope: absent, `root`, or a folder UUID.
    pub parent_id: Option<String>,
    /// Substring name search.
    pub search: Option<String>,
    /// Sort column.
    pub sort_by: Option<FolderSortKey>,
    /// Sort direction.
    pub sort_order: Option<SortDirection>,
}

impl ListFoldersParams {
    /// Convert into the domain query, applying defaults.
    pub fn into_query(self) -> Result<FolderQuery, AppError> {
        let defaults = FolderQuery::default();
        Ok(FolderQuery {
            scope: parse_scope(self.parent_id.as_deref())?,
            search: self.search,
            sort_by: self.sort_by.unwrap_or(defaults.sort_by),
            sort_order: self.sort_order.unwrap_or(defaults.sort_order),
        })
    }
}
