//! Storage domain value objects.

pub mod usage;

pub use usage::StorageUsage;
