use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::IntoResponse,
};
use common::export::write_csv;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{other_details, prime_details};
use crate::error::{AppError, ErrorBody};
use crate::extractors::permission::Principal;
use crate::models::specimen::DownloadRequest;
use crate::state::AppState;
use crate::utils::catalog::load_catalog;
use crate::utils::specimen::to_row;

pub const DOWNLOAD_FILENAME: &str = "mbtb_data.csv";

#[utoipa::path(
    post,
    path = "/download_data/",
    tag = "Specimens",
    operation_id = "downloadData",
    summary = "Export specimens as CSV",
    description = "Writes the upload format, so the file can be uploaded again. An empty body exports every specimen.",
    request_body = DownloadRequest,
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal, body), fields(account_id = principal.account_id))]
pub async fn download_data(
    principal: Principal,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let request = parse_request(&body)?;

    let mut query = prime_details::Entity::find().order_by_asc(prime_details::Column::Id);
    if let Some(codes) = request.mbtb_codes {
        if codes.is_empty() {
            return Err(AppError::Validation("mbtb_codes must not be empty".into()));
        }
        query = query.filter(prime_details::Column::MbtbCode.is_in(codes));
    }
    let primes = query.all(&state.db).await?;

    let mut others: HashMap<i32, other_details::Model> = other_details::Entity::find()
        .filter(other_details::Column::PrimeDetailsId.is_in(primes.iter().map(|p| p.id)))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|o| (o.prime_details_id, o))
        .collect();

    let catalog = load_catalog(&state.db).await?;
    let rows: Vec<_> = primes
        .iter()
        .map(|p| to_row(p, others.remove(&p.id).as_ref(), &catalog))
        .collect();

    let csv = write_csv(&rows).map_err(|e| AppError::Internal(e.to_string()))?;
    tracing::info!(rows = rows.len(), "Export written");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        csv,
    ))
}

fn parse_request(body: &[u8]) -> Result<DownloadRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DownloadRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))
}
