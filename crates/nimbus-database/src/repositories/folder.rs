//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use nimbus_core::error::{AppError, ErrorKind};
use nimbus_core::result::AppResult;
use nimbus_core::types::{FolderQuery, FolderScope};
use nimbus_entity::folder::{CreateFolder, Folder, UpdateFolder};

use super::FolderStore;

/// PostgreSQL repository for folder rows.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the dynamic listing query. Sort column and direction come from
/// closed enums, so interpolating them is safe; everything user-supplied
/// goes through bind parameters.
fn build_list_query(owner_id: Uuid, query: &FolderQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder: QueryBuilder<'static, Postgres> =
        QueryBuilder::new("SELECT * FROM folders WHERE owner_id = ");
    builder.push_bind(owner_id);

    match query.scope {
        FolderScope::Any => {}
        FolderScope::Root => {
            builder.push(" AND parent_id IS NULL");
        }
        FolderScope::In(parent_id) => {
            builder.push(" AND parent_id = ");
            builder.push_bind(parent_id);
        }
    }

    if let Some(term) = query.search_term() {
        builder.push(" AND name ILIKE ");
        builder.push_bind(format!("%{term}%"));
    }

    builder.push(format!(
        " ORDER BY {} {}",
        query.sort_by.column(),
        query.sort_order.as_sql()
    ));
    builder
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn list(&self, owner_id: Uuid, query: &FolderQuery) -> AppResult<Vec<Folder>> {
        build_list_query(owner_id, query)
            .build_query_as::<Folder>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, owner_id, parent_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.owner_id)
        .bind(data.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: &UpdateFolder,
    ) -> AppResult<Option<Folder>> {
        let mut builder: QueryBuilder<'static, Postgres> =
            QueryBuilder::new("UPDATE folders SET updated_at = NOW()");
        if let Some(name) = &update.name {
            builder.push(", name = ");
            builder.push_bind(name.clone());
        }
        if let Some(parent_id) = update.parent_id {
            builder.push(", parent_id = ");
            builder.push_bind(parent_id);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" AND owner_id = ");
        builder.push_bind(owner_id);
        builder.push(" RETURNING *");

        builder
            .build_query_as::<Folder>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update folder", e))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use nimbus_core::types::{FolderSortKey, SortDirection};

    use super::*;

    #[test]
    fn list_query_defaults_sort_by_name() {
        let query = FolderQuery::default();
        let builder = build_list_query(Uuid::new_v4(), &query);
        assert_eq!(
            builder.sql(),
            "SELECT * FROM folders WHERE owner_id = $1 ORDER BY name ASC"
        );
    }

    #[test]
    fn list_query_scopes_to_root() {
        let query = FolderQuery {
            scope: FolderScope::Root,
            ..FolderQuery::default()
        };
        let builder = build_list_query(Uuid::new_v4(), &query);
        assert_eq!(
            builder.sql(),
            "SELECT * FROM folders WHERE owner_id = $1 AND parent_id IS NULL ORDER BY name ASC"
        );
    }

    #[test]
    fn list_query_binds_parent_and_search() {
        let query = FolderQuery {
            scope: FolderScope::In(Uuid::new_v4()),
            search: Some("tax".to_string()),
            sort_by: FolderSortKey::CreatedAt,
            sort_order: SortDirection::Desc,
        };
        let builder = build_list_query(Uuid::new_v4(), &query);
        assert_eq!(
            builder.sql(),
            "SELECT * FROM folders WHERE owner_id = $1 AND parent_id = $2 \
             AND name ILIKE $3 ORDER BY created_at DESC"
        );
    }
}
