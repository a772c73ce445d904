//! Schema migration runner.

use sqlx::PgPool;
use tracing::info;

use nimbus_core::error::{AppError, ErrorKind};

/// Bring the schema up to date. Already-applied migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Applying schema migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to apply migrations: {e}"),
                e,
            )
        })?;

    info!("Schema is up to date");
    Ok(())
}
