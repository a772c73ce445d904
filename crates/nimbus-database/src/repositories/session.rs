//! Session repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use nimbus_core::error::{AppError, ErrorKind};
use nimbus_core::result::AppResult;
use nimbus_entity::session::Session;

use super::SessionStore;

/// PostgreSQL repository for session rows.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }
}
