use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
    TransactionTrait,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{campaign_record, uploaded_file};
use crate::error::AppError;
use crate::hash::sha256_hex;
use crate::ingest::{parse_rows, records_from_rows};
use crate::services::storage::StorageService;

#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    message: String,
    id: Uuid,
    record_count: usize,
}

const SPREADSHEET_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Rows per INSERT statement. Postgres caps bind parameters at 65535 and
/// each record binds ~88 values, so large sheets must go out in slices; the
/// surrounding transaction keeps the batch atomic.
const INSERT_BATCH_SIZE: usize = 500;

/// POST /upload
///
/// Accepts one spreadsheet as multipart form data (`file` field, optional
/// `name` field defaulting to the uploaded filename) and ingests every data
/// row. The sheet is parsed *before* anything is persisted, and the file
/// identity plus the full record batch commit in one transaction, so a
/// failed upload leaves no partial state.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Upload",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File uploaded and processed", body = UploadResponse),
        (status = 400, description = "Validation failure (duplicate content, corrupt sheet, schema mismatch)"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn upload_file(
    State(db): State<DatabaseConnection>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut name: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename = String::from("upload.xlsx");

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Invalid multipart data".to_string()))?
    {
        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some("file") => {
                if let Some(fname) = field.file_name() {
                    filename = fname.to_string();
                }
                let data = field.bytes().await.map_err(|_| {
                    AppError::InternalServerError("Failed to read file bytes".to_string())
                })?;
                file_bytes = Some(data.to_vec());
            }
            Some("name") => {
                let value = field.text().await.map_err(|_| {
                    AppError::BadRequest("Invalid multipart data".to_string())
                })?;
                if !value.trim().is_empty() {
                    name = Some(value.trim().to_string());
                }
            }
            _ => {}
        }
    }

    let bytes = file_bytes
        .ok_or_else(|| AppError::validation("file", "No file field found"))?;
    let name = name.unwrap_or_else(|| filename.clone());

    // Duplicate-content guard. The unique constraint on file_hash backs this
    // up at the database level if two identical uploads race.
    let file_hash = sha256_hex(&bytes);
    let duplicate = uploaded_file::Entity::find()
        .filter(uploaded_file::Column::FileHash.eq(file_hash.clone()))
        .one(&db)
        .await?;
    if duplicate.is_some() {
        return Err(AppError::validation(
            "file_hash",
            "File with the same content already exists.",
        ));
    }

    let name_taken = uploaded_file::Entity::find()
        .filter(uploaded_file::Column::Name.eq(name.clone()))
        .one(&db)
        .await?;
    if name_taken.is_some() {
        return Err(AppError::validation(
            "name",
            "File with this name already exists.",
        ));
    }

    // Parse before persisting anything.
    let rows = parse_rows(&bytes)?;
    let file_id = Uuid::new_v4();
    let records = records_from_rows(file_id, &rows)?;
    let record_count = records.len();

    let storage = StorageService::new().await;
    let storage_key = format!("uploads/{}/{}", file_id, filename);
    storage.ensure_bucket_exists().await?;
    storage
        .put_object(&storage_key, bytes, SPREADSHEET_CONTENT_TYPE)
        .await?;

    let result = insert_file_with_records(&db, file_id, &name, &storage_key, &file_hash, records)
        .await;

    if let Err(err) = result {
        // Best-effort blob cleanup; the identity row never landed.
        if let Err(cleanup) = storage.delete_object(&storage_key).await {
            tracing::warn!(error = ?cleanup, key = %storage_key, "orphaned blob cleanup failed");
        }
        return Err(err);
    }

    tracing::info!(file = %name, records = record_count, "spreadsheet ingested");
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "File uploaded and processed successfully".to_string(),
            id: file_id,
            record_count,
        }),
    ))
}

/// File identity and record batch succeed or fail together.
async fn insert_file_with_records(
    db: &DatabaseConnection,
    file_id: Uuid,
    name: &str,
    storage_key: &str,
    file_hash: &str,
    records: Vec<campaign_record::ActiveModel>,
) -> Result<(), AppError> {
    let txn = db.begin().await?;

    let file = uploaded_file::ActiveModel {
        id: Set(file_id),
        name: Set(name.to_string()),
        storage_key: Set(storage_key.to_string()),
        file_hash: Set(Some(file_hash.to_string())),
        uploaded_at: Set(chrono::Utc::now().naive_utc()),
    };
    file.insert(&txn).await.map_err(map_unique_violation)?;

    for chunk in records.chunks(INSERT_BATCH_SIZE) {
        campaign_record::Entity::insert_many(chunk.to_vec())
            .exec(&txn)
            .await?;
    }

    txn.commit().await.map_err(map_unique_violation)?;
    Ok(())
}

fn map_unique_violation(err: sea_orm::DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => duplicate_fault(&msg),
        _ => AppError::DatabaseError(err),
    }
}

/// Attributes a uniqueness violation to the column whose constraint fired.
/// Postgres names the constraint after the column, so the violation message
/// carries it.
fn duplicate_fault(message: &str) -> AppError {
    if message.contains("file_hash") {
        AppError::validation("file_hash", "File with the same content already exists.")
    } else if message.contains("name") {
        AppError::validation("name", "File with this name already exists.")
    } else {
        AppError::validation(
            "non_field_errors",
            "Duplicate value violates a uniqueness constraint.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::EXPECTED_COLUMNS;

    #[test]
    fn insert_batches_stay_under_the_bind_parameter_cap() {
        // 87 data columns plus uploaded_file_id bound per row; id is NotSet.
        let binds_per_row = EXPECTED_COLUMNS + 1;
        assert!(INSERT_BATCH_SIZE * binds_per_row <= u16::MAX as usize);
    }

    #[test]
    fn duplicate_fault_names_the_hash_field() {
        let fault = duplicate_fault(
            "duplicate key value violates unique constraint \"uploaded_files_file_hash_key\"",
        );
        match fault {
            AppError::Validation { field, .. } => assert_eq!(field, "file_hash"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn duplicate_fault_names_the_name_field() {
        let fault = duplicate_fault(
            "duplicate key value violates unique constraint \"uploaded_files_name_key\"",
        );
        match fault {
            AppError::Validation { field, .. } => assert_eq!(field, "name"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn duplicate_fault_falls_back_to_field_neutral() {
        let fault = duplicate_fault("duplicate key value violates unique constraint \"other\"");
        match fault {
            AppError::Validation { field, .. } => assert_eq!(field, "non_field_errors"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
