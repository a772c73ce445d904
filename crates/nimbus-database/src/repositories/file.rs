//! File repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use nimbus_core::error::{AppError, ErrorKind};
use nimbus_core::result::AppResult;
use nimbus_core::types::{FileClass, FileQuery, FolderScope};
use nimbus_entity::file::{CreateFile, File, UpdateFile};
use nimbus_entity::storage::StorageUsage;

use super::FileStore;

/// PostgreSQL repository for file rows.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// OR-join ILIKE conditions for a set of MIME patterns.
fn push_mime_patterns<'a>(
    builder: &mut QueryBuilder<'static, Postgres>,
    patterns: impl IntoIterator<Item = &'a str>,
) {
    let mut first = true;
    for pattern in patterns {
        if !first {
            builder.push(" OR ");
        }
        first = false;
        builder.push("mime_type ILIKE ");
        builder.push_bind(format!("%{pattern}%"));
    }
}

/// Build the dynamic listing query. The trash filter always applies:
/// trashed and active files never appear in the same listing. Sort column
/// and direction come from closed enums; everything user-supplied goes
/// through bind parameters.
fn build_list_query(owner_id: Uuid, query: &FileQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder: QueryBuilder<'static, Postgres> =
        QueryBuilder::new("SELECT * FROM files WHERE owner_id = ");
    builder.push_bind(owner_id);

    builder.push(" AND is_trashed = ");
    builder.push_bind(query.trashed);

    if query.starred {
        builder.push(" AND is_starred = TRUE");
    }

    match query.scope {
        FolderScope::Any => {}
        FolderScope::Root => {
            builder.push(" AND folder_id IS NULL");
        }
        FolderScope::In(folder_id) => {
            builder.push(" AND folder_id = ");
            builder.push_bind(folder_id);
        }
    }

    if let Some(term) = query.search_term() {
        builder.push(" AND name ILIKE ");
        builder.push_bind(format!("%{term}%"));
    }

    match query.file_type {
        FileClass::All => {}
        FileClass::Other => {
            builder.push(" AND NOT (");
            push_mime_patterns(&mut builder, FileClass::all_patterns());
            builder.push(")");
        }
        class => {
            if let Some(patterns) = class.patterns() {
                builder.push(" AND (");
                push_mime_patterns(&mut builder, patterns.iter().copied());
                builder.push(")");
            }
        }
    }

    builder.push(format!(
        " ORDER BY {} {}",
        query.sort_by.column(),
        query.sort_order.as_sql()
    ));
    builder
}

#[async_trait]
impl FileStore for FileRepository {
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn list(&self, owner_id: Uuid, query: &FileQuery) -> AppResult<Vec<File>> {
        build_list_query(owner_id, query)
            .build_query_as::<File>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn list_in_folder(&self, folder_id: Uuid, owner_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE folder_id = $1 AND owner_id = $2 ORDER BY created_at ASC",
        )
        .bind(folder_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list files in folder", e)
        })
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (name, owner_id, folder_id, size, mime_type, storage_key) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.owner_id)
        .bind(data.folder_id)
        .bind(data.size)
        .bind(&data.mime_type)
        .bind(&data.storage_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("files_storage_key_key") =>
            {
                AppError::conflict(format!(
                    "Storage key '{}' is already registered",
                    data.storage_key
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create file", e),
        })
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: &UpdateFile,
    ) -> AppResult<Option<File>> {
        let mut builder: QueryBuilder<'static, Postgres> =
            QueryBuilder::new("UPDATE files SET updated_at = NOW()");
        if let Some(name) = &update.name {
            builder.push(", name = ");
            builder.push_bind(name.clone());
        }
        if let Some(folder_id) = update.folder_id {
            builder.push(", folder_id = ");
            builder.push_bind(folder_id);
        }
        if let Some(starred) = update.is_starred {
            builder.push(", is_starred = ");
            builder.push_bind(starred);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" AND owner_id = ");
        builder.push_bind(owner_id);
        builder.push(" RETURNING *");

        builder
            .build_query_as::<File>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file", e))
    }

    async fn set_trashed(
        &self,
        id: Uuid,
        owner_id: Uuid,
        trashed: bool,
    ) -> AppResult<Option<File>> {
        let sql = if trashed {
            "UPDATE files SET is_trashed = TRUE, trashed_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *"
        } else {
            "UPDATE files SET is_trashed = FALSE, trashed_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *"
        };
        sqlx::query_as::<_, File>(sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to change trash state", e)
            })
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn usage(&self, owner_id: Uuid, include_trashed: bool) -> AppResult<StorageUsage> {
        let mut builder: QueryBuilder<'static, Postgres> = QueryBuilder::new(
            "SELECT COALESCE(SUM(size), 0)::BIGINT AS total_size, COUNT(*) AS file_count \
             FROM files WHERE owner_id = ",
        );
        builder.push_bind(owner_id);
        if !include_trashed {
            builder.push(" AND is_trashed = FALSE");
        }

        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to compute storage usage", e)
            })?;
        Ok(StorageUsage {
            total_size: row.try_get("total_size").map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to read usage row", e)
            })?,
            file_count: row.try_get("file_count").map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to read usage row", e)
            })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use nimbus_core::types::{FileSortKey, SortDirection};

    use super::*;

    #[test]
    fn list_query_defaults_exclude_trash() {
        let builder = build_list_query(Uuid::new_v4(), &FileQuery::default());
        assert_eq!(
            builder.sql(),
            "SELECT * FROM files WHERE owner_id = $1 AND is_trashed = $2 \
             ORDER BY created_at DESC"
        );
    }

    #[test]
    fn starred_filter_only_restricts_when_set() {
        let query = FileQuery {
            starred: true,
            ..FileQuery::default()
        };
        let builder = build_list_query(Uuid::new_v4(), &query);
        assert!(builder.sql().contains("AND is_starred = TRUE"));

        let builder = build_list_query(Uuid::new_v4(), &FileQuery::default());
        assert!(!builder.sql().contains("is_starred"));
    }

    #[test]
    fn root_scope_matches_null_folder() {
        let query = FileQuery {
            scope: FolderScope::Root,
            ..FileQuery::default()
        };
        let builder = build_list_query(Uuid::new_v4(), &query);
        assert!(builder.sql().contains("AND folder_id IS NULL"));
    }

    #[test]
    fn class_filter_ors_every_pattern() {
        let query = FileQuery {
            file_type: FileClass::Image,
            ..FileQuery::default()
        };
        let builder = build_list_query(Uuid::new_v4(), &query);
        assert!(builder.sql().contains("AND (mime_type ILIKE $3)"));

        let query = FileQuery {
            file_type: FileClass::Document,
            ..FileQuery::default()
        };
        let builder = build_list_query(Uuid::new_v4(), &query);
        let clauses = builder.sql().matches("mime_type ILIKE").count();
        assert_eq!(
            clauses,
            FileClass::Document.patterns().map(<[_]>::len).unwrap_or(0)
        );
    }

    #[test]
    fn other_class_negates_every_known_pattern() {
        let query = FileQuery {
            file_type: FileClass::Other,
            ..FileQuery::default()
        };
        let builder = build_list_query(Uuid::new_v4(), &query);
        let sql = builder.sql();
        assert!(sql.contains("AND NOT (mime_type ILIKE"));
        assert_eq!(
            sql.matches("mime_type ILIKE").count(),
            FileClass::all_patterns().count()
        );
    }

    #[test]
    fn search_and_sort_compose() {
        let query = FileQuery {
            search: Some("  report ".to_string()),
            sort_by: FileSortKey::Size,
            sort_order: SortDirection::Asc,
            ..FileQuery::default()
        };
        let builder = build_list_query(Uuid::new_v4(), &query);
        assert_eq!(
            builder.sql(),
            "SELECT * FROM files WHERE owner_id = $1 AND is_trashed = $2 \
             AND name ILIKE $3 ORDER BY size ASC"
        );
    }
}
