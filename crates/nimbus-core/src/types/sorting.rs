//! Sorting types for list endpoints.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sortable file columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileSortKey {
    /// Sort by file name.
    Name,
    /// Sort by size in bytes.
    Size,
    /// Sort by creation time.
    CreatedAt,
    /// Sort by last update time.
    UpdatedAt,
}

impl FileSortKey {
    /// Return the SQL column this key sorts on.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Size => "size",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// Sortable folder columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FolderSortKey {
    /// Sort by folder name.
    Name,
    /// Sort by creation time.
    CreatedAt,
}

impl FolderSortKey {
    /// Return the SQL column this key sorts on.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_as_sql() {
        assert_eq!(SortDirection::Asc.as_sql(), "ASC");
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
    }

    #[test]
    fn sort_keys_deserialize_camel_case() {
        let key: FileSortKey = serde_json::from_str("\"createdAt\"").expect("parse");
        assert_eq!(key, FileSortKey::CreatedAt);
        assert_eq!(key.column(), "created_at");
    }
}
