//! Presigned transfer and usage handlers.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use nimbus_entity::storage::StorageUsage;
use nimbus_service::storage::{DownloadTicket, UploadRequest, UploadTicket};

use crate::dto::request::{validate_dto, UploadUrlBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/storage/upload-url
pub async fn upload_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<UploadUrlBody>,
) -> ApiResult<Json<ApiResponse<UploadTicket>>> {
    validate_dto(&body)?;
    let ticket = state
        .storage_service
        .sign_upload(
            &auth,
            UploadRequest {
                file_name: body.file_name,
                content_type: body.content_type,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(ticket)))
}

/// GET /api/storage/download-url/{file_id}
pub async fn download_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(file_id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<DownloadTicket>>> {
    let ticket = state.storage_service.sign_download(&auth, file_id).await?;
    Ok(Json(ApiResponse::ok(ticket)))
}

/// GET /api/storage/usage
pub async fn usage(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<StorageUsage>>> {
    let usage = state.storage_service.usage(&auth).await?;
    Ok(Json(ApiResponse::ok(usage)))
}
