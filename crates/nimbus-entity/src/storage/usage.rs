//! Aggregate storage usage.

use serde::{Deserialize, Serialize};

/// A user's storage footprint across all their files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageUsage {
    /// Total bytes across the counted files.
    pub total_size: i64,
    /// Number of files counted.
    pub file_count: i64,
}
