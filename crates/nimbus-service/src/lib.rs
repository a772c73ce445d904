//! # nimbus-service
//!
//! Business logic service layer for Nimbus Drive. Each service orchestrates
//! repositories and the object store to implement application-level
//! use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references to the store traits, so the
//! persistence and storage layers can be swapped in tests.

pub mod context;
pub mod file;
pub mod folder;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use file::FileService;
pub use folder::FolderService;
pub use storage::StorageService;
