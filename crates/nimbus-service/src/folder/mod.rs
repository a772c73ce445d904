//! Folder services: CRUD and path resolution.

pub mod path;
pub mod service;

pub use service::{CreateFolderRequest, FolderService, UpdateFolderRequest};
