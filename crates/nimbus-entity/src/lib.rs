//! # nimbus-entity
//!
//! Domain entity models for Nimbus Drive. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod file;
pub mod folder;
pub mod session;
pub mod storage;
