//! File lifecycle services.

pub mod service;

pub use service::{FileService, RegisterFileRequest, UpdateFileRequest};
