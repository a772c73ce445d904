//! Storage services: presigned transfers and usage accounting.

pub mod service;

pub use service::{DownloadTicket, StorageService, UploadRequest, UploadTicket};
