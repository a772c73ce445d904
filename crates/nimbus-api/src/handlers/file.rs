//! File CRUD and lifecycle handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use nimbus_entity::file::File;
use nimbus_service::file::{RegisterFileRequest, UpdateFileRequest};

use crate::dto::request::{validate_dto, ListFilesParams, RegisterFileBody, UpdateFileBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListFilesParams>,
) -> ApiResult<Json<ApiResponse<Vec<File>>>> {
    let query = params.into_query()?;
    let files = state.file_service.list(&auth, &query).await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<File>>> {
    let file = state.file_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// POST /api/files
pub async fn register_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<RegisterFileBody>,
) -> ApiResult<Json<ApiResponse<File>>> {
    validate_dto(&body)?;
    let file = state
        .file_service
        .register(
            &auth,
            RegisterFileRequest {
                name: body.name,
                folder_id: body.folder_id,
                size: body.size,
                mime_type: body.mime_type,
                storage_key: body.storage_key,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/files/{id}
pub async fn update_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateFileBody>,
) -> ApiResult<Json<ApiResponse<File>>> {
    validate_dto(&body)?;
    let file = state
        .file_service
        .update(
            &auth,
            id,
            UpdateFileRequest {
                name: body.name,
                folder_id: body.folder_id,
                is_starred: body.is_starred,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// POST /api/files/{id}/trash
pub async fn trash_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<File>>> {
    let file = state.file_service.trash(&auth, id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// POST /api/files/{id}/restore
pub async fn restore_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<File>>> {
    let file = state.file_service.restore(&auth, id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.file_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "File permanently deleted",
    ))))
}
