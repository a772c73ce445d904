//! Breadcrumb path resolution.
//!
//! The ancestor chain is walked one parent at a time, the same way the
//! rows are linked. The walk is bounded and cycle-checked: parent links
//! are plain nullable references, so nothing in the schema prevents a
//! corrupted chain, and an unbounded walk over one would never return.

use std::collections::HashSet;

use uuid::Uuid;

use nimbus_core::error::AppError;
use nimbus_entity::folder::Breadcrumb;

use crate::context::RequestContext;

use super::service::FolderService;

/// Longest ancestor chain the resolver will follow.
pub const MAX_PATH_DEPTH: usize = 1000;

impl FolderService {
    /// Resolves the breadcrumb trail for a folder, ordered root-first
    /// and ending with the folder itself.
    ///
    /// A cycle in the parent chain, a chain longer than
    /// [`MAX_PATH_DEPTH`], or a parent link pointing at a missing or
    /// foreign folder all mean the hierarchy is corrupt.
    pub async fn breadcrumbs(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<Vec<Breadcrumb>, AppError> {
        let folder = self.get(ctx, folder_id).await?;

        let mut visited = HashSet::from([folder.id]);
        let mut trail = vec![Breadcrumb {
            id: folder.id,
            name: folder.name,
        }];
        let mut parent = folder.parent_id;

        while let Some(parent_id) = parent {
            if !visited.insert(parent_id) {
                return Err(AppError::corrupt_hierarchy(format!(
                    "Cycle detected in folder hierarchy at {parent_id}"
                )));
            }
            if trail.len() >= MAX_PATH_DEPTH {
                return Err(AppError::corrupt_hierarchy(format!(
                    "Folder {folder_id} exceeds maximum path depth {MAX_PATH_DEPTH}"
                )));
            }

            let ancestor = self
                .folders
                .find_owned(parent_id, ctx.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::corrupt_hierarchy(format!(
                        "Folder {folder_id} has a broken parent link to {parent_id}"
                    ))
                })?;

            parent = ancestor.parent_id;
            trail.push(Breadcrumb {
                id: ancestor.id,
                name: ancestor.name,
            });
        }

        trail.reverse();
        Ok(trail)
    }
}
