//! Folder CRUD and path handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use nimbus_entity::folder::{Breadcrumb, Folder};
use nimbus_service::folder::{CreateFolderRequest, UpdateFolderRequest};

use crate::dto::request::{validate_dto, CreateFolderBody, ListFoldersParams, UpdateFolderBody};
use crate::dto::response::{ApiResponse, FolderWithPath, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListFoldersParams>,
) -> ApiResult<Json<ApiResponse<Vec<Folder>>>> {
    let query = params.into_query()?;
    let folders = state.folder_service.list(&auth, &query).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<FolderWithPath>>> {
    let folder = state.folder_service.get(&auth, id).await?;
    let path = state.folder_service.breadcrumbs(&auth, id).await?;
    Ok(Json(ApiResponse::ok(FolderWithPath { folder, path })))
}

/// GET /api/folders/{id}/path
pub async fn get_folder_path(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<Breadcrumb>>>> {
    let path = state.folder_service.breadcrumbs(&auth, id).await?;
    Ok(Json(ApiResponse::ok(path)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateFolderBody>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    validate_dto(&body)?;
    let folder = state
        .folder_service
        .create(
            &auth,
            CreateFolderRequest {
                name: body.name,
                parent_id: body.parent_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateFolderBody>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    validate_dto(&body)?;
    let folder = state
        .folder_service
        .update(
            &auth,
            id,
            UpdateFolderRequest {
                name: body.name,
                parent_id: body.parent_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.folder_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Folder deleted"))))
}
