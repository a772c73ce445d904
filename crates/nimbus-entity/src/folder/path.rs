//! Breadcrumb path segments.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One segment of a folder's ancestry path.
///
/// A breadcrumb trail is ordered root-first and always ends with the
/// folder it was resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// The folder at this segment.
    pub id: Uuid,
    /// The folder's name at resolution time.
    pub name: String,
}
