//! Core type definitions used across the Nimbus workspace.

pub mod file_class;
pub mod query;
pub mod sorting;

pub use file_class::FileClass;
pub use query::{FileQuery, FolderQuery, FolderScope};
pub use sorting::{FileSortKey, FolderSortKey, SortDirection};
