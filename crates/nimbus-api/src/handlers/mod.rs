//! HTTP request handlers, one module per domain.

pub mod file;
pub mod folder;
pub mod health;
pub mod storage;
