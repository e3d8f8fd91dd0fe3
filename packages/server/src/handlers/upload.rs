use axum::{
    Json,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::IntoResponse,
};
use common::{UploadedFile, import_table, read_upload};
use sea_orm::*;
use tracing::instrument;

use crate::error::{AppError, ErrorBody, FailureBody};
use crate::extractors::permission::Principal;
use crate::models::specimen::SuccessResponse;
use crate::state::AppState;
use crate::utils::catalog::load_catalog;
use crate::utils::store::SeaOrmSpecimenStore;

#[utoipa::path(
    post,
    path = "/file_upload/",
    tag = "Specimens",
    operation_id = "fileUpload",
    summary = "Bulk import specimens from CSV",
    description = "Admin only. The `file` field must be a `.csv` whose header is exactly the set of upload columns. Rows are inserted in file order inside one transaction; the first failing row aborts the whole file and nothing is kept.",
    request_body(content_type = "multipart/form-data", description = "CSV file in the `file` field"),
    responses(
        (status = 201, description = "Every row inserted", body = SuccessResponse),
        (status = 400, description = "File or row rejected", body = FailureBody),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal, multipart), fields(admin_id = principal.account_id))]
pub async fn file_upload(
    principal: Principal,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let file = match multipart {
        Ok(multipart) => find_file(multipart).await?,
        Err(rejection) => {
            tracing::debug!("Upload is not multipart: {rejection}");
            None
        }
    };
    let table = read_upload(file)?;

    let txn = state.db.begin().await?;
    let catalog = load_catalog(&txn).await?;
    let store = SeaOrmSpecimenStore::new(&txn);

    match import_table(&table, &catalog, &store).await {
        Ok(report) => {
            txn.commit().await?;
            tracing::info!(rows = report.rows(), "Upload committed");
            Ok((StatusCode::CREATED, Json(SuccessResponse::OK)))
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e.into())
        }
    }
}

/// Pull the `file` field out of the form, ignoring anything else.
async fn find_file(mut multipart: Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
            return Ok(Some(UploadedFile {
                filename,
                bytes: bytes.to_vec(),
            }));
        }
    }
    Ok(None)
}

/// Body limit layer for the upload route.
pub fn upload_body_limit(max_file_size: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_file_size)
}
