//! # nimbus-storage
//!
//! S3-compatible object storage integration. Object content never passes
//! through the server: clients upload and download directly against
//! presigned URLs issued here.

pub mod s3;

pub use s3::S3ObjectStore;
