//! # nimbus-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all Nimbus Drive entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{FileStore, FolderStore, SessionStore};
