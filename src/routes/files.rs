use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::uploaded_file;
use crate::error::AppError;
use crate::services::storage::StorageService;

#[derive(Serialize, utoipa::ToSchema)]
pub struct FileResponse {
    pub id: Uuid,
    pub name: String,
    pub storage_key: String,
    pub file_hash: Option<String>,
    pub uploaded_at: String,
}

impl From<uploaded_file::Model> for FileResponse {
    fn from(model: uploaded_file::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            storage_key: model.storage_key,
            file_hash: model.file_hash,
            uploaded_at: model.uploaded_at.to_string(),
        }
    }
}

/// GET /files
#[utoipa::path(
    get,
    path = "/files",
    responses(
        (status = 200, description = "All uploaded file identities", body = Vec<FileResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Files"
)]
pub async fn list_files(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<FileResponse>>, AppError> {
    let files = uploaded_file::Entity::find()
        .order_by_desc(uploaded_file::Column::UploadedAt)
        .all(&db)
        .await?;

    Ok(Json(files.into_iter().map(FileResponse::from).collect()))
}

/// DELETE /files/{id}
///
/// Removes the file identity; the database cascades the delete to every
/// campaign record the file owns. The blob delete is best-effort.
#[utoipa::path(
    delete,
    path = "/files/{id}",
    params(
        ("id" = Uuid, Path, description = "Uploaded file ID")
    ),
    responses(
        (status = 200, description = "File and its records deleted"),
        (status = 404, description = "File not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Files"
)]
pub async fn delete_file(
    Path(id): Path<Uuid>,
    State(db): State<DatabaseConnection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let file = uploaded_file::Entity::find_by_id(id)
        .one(&db)
        .await?
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    let storage = StorageService::new().await;
    if let Err(e) = storage.delete_object(&file.storage_key).await {
        tracing::warn!(error = ?e, key = %file.storage_key, "blob delete failed, continuing");
    }

    uploaded_file::Entity::delete_by_id(id).exec(&db).await?;

    tracing::info!(file = %file.name, "file deleted");
    Ok(Json(serde_json::json!({
        "message": "File deleted successfully",
        "id": id
    })))
}
