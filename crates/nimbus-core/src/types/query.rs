//! List-query filter types for files and folders.
//!
//! All filters are AND-combined. Ownership is not part of these types:
//! the repository layer applies it unconditionally to every query.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::file_class::FileClass;
use super::sorting::{FileSortKey, FolderSortKey, SortDirection};

/// Folder scoping for a list query.
///
/// Three distinct states: no folder constraint at all (starred/trash views
/// span folders), top-level entries only, or the contents of one folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FolderScope {
    /// No folder constraint.
    #[default]
    Any,
    /// Top-level only (`folder_id IS NULL`).
    Root,
    /// Entries inside a specific folder.
    In(Uuid),
}

/// Filter, search, and sort parameters for listing files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileQuery {
    /// Folder scoping.
    pub scope: FolderScope,
    /// When true, restrict to starred files. False is a no-op.
    pub starred: bool,
    /// Trash view selector. Trashed and active files are never mixed:
    /// false (the default) returns only active files, true only trashed.
    pub trashed: bool,
    /// Substring match on the file name.
    pub search: Option<String>,
    /// MIME classification filter.
    pub file_type: FileClass,
    /// Sort column.
    pub sort_by: FileSortKey,
    /// Sort direction.
    pub sort_order: SortDirection,
}

impl Default for FileQuery {
    fn default() -> Self {
        Self {
            scope: FolderScope::Any,
            starred: false,
            trashed: false,
            search: None,
            file_type: FileClass::All,
            sort_by: FileSortKey::CreatedAt,
            sort_order: SortDirection::Desc,
        }
    }
}

impl FileQuery {
    /// The effective search term, with empty or whitespace-only input
    /// treated as absent.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Filter, search, and sort parameters for listing folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderQuery {
    /// Parent-folder scoping.
    pub scope: FolderScope,
    /// Substring match on the folder name.
    pub search: Option<String>,
    /// Sort column.
    pub sort_by: FolderSortKey,
    /// Sort direction.
    pub sort_order: SortDirection,
}

impl Default for FolderQuery {
    fn default() -> Self {
        Self {
            scope: FolderScope::Any,
            search: None,
            sort_by: FolderSortKey::Name,
            sort_order: SortDirection::Asc,
        }
    }
}

impl FolderQuery {
    /// The effective search term, with empty or whitespace-only input
    /// treated as absent.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_query_defaults_to_active_newest_first() {
        let query = FileQuery::default();
        assert!(!query.trashed);
        assert!(!query.starred);
        assert_eq!(query.scope, FolderScope::Any);
        assert_eq!(query.sort_by, FileSortKey::CreatedAt);
        assert_eq!(query.sort_order, SortDirection::Desc);
    }

    #[test]
    fn whitespace_search_is_absent() {
        let query = FileQuery {
            search: Some("   ".to_string()),
            ..FileQuery::default()
        };
        assert_eq!(query.search_term(), None);

        let query = FileQuery {
            search: Some("  report ".to_string()),
            ..FileQuery::default()
        };
        assert_eq!(query.search_term(), Some("report"));
    }

    #[test]
    fn folder_query_defaults_to_name_ascending() {
        let query = FolderQuery::default();
        assert_eq!(query.sort_by, FolderSortKey::Name);
        assert_eq!(query.sort_order, SortDirection::Asc);
    }
}
