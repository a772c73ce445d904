//! Health check handlers.

use axum::extract::State;
use axum::Json;

use nimbus_core::error::AppError;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = database_status(state.db.health_check().await);

    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    }))
}

/// An unreachable database reads as "error" rather than failing the
/// endpoint; the process itself is still up.
fn database_status(check: Result<bool, AppError>) -> &'static str {
    match check {
        Ok(true) => "connected",
        Ok(false) | Err(_) => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachable_database_reads_as_connected() {
        assert_eq!(database_status(Ok(true)), "connected");
    }

    #[test]
    fn unreachable_database_reads_as_error() {
        assert_eq!(database_status(Ok(false)), "error");
        assert_eq!(
            database_status(Err(AppError::database("connection refused"))),
            "error"
        );
    }
}
