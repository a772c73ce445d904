//! # nimbus-core
//!
//! Core crate for Nimbus. Contains configuration schemas, the unified
//! error system, shared query/sort types, MIME classification, and the
//! object-store capability trait.
//!
//! This crate has **no** internal dependencies on other Nimbus crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
