use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::{RawRow, SelectOptions, insert_row};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{other_details, prime_details};
use crate::error::{AppError, ErrorBody, FailureBody};
use crate::extractors::json::AppJson;
use crate::extractors::permission::Principal;
use crate::models::specimen::{
    NewDataRequest, OtherDetailsResponse, PrimeDetailsResponse, SuccessResponse,
};
use crate::state::AppState;
use crate::utils::catalog::load_catalog;
use crate::utils::store::SeaOrmSpecimenStore;

#[utoipa::path(
    get,
    path = "/brain_dataset/",
    tag = "Specimens",
    operation_id = "listBrainDataset",
    summary = "List prime details records",
    responses(
        (status = 200, description = "All prime details records, oldest first", body = Vec<PrimeDetailsResponse>),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal), fields(account_id = principal.account_id))]
pub async fn list_prime_details(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<PrimeDetailsResponse>>, AppError> {
    let catalog = load_catalog(&state.db).await?;
    let rows = prime_details::Entity::find()
        .order_by_asc(prime_details::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|m| PrimeDetailsResponse::new(m, &catalog))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/brain_dataset/{id}/",
    tag = "Specimens",
    operation_id = "getBrainDataset",
    summary = "Get one prime details record",
    params(("id" = i32, Path, description = "Prime details ID")),
    responses(
        (status = 200, description = "Prime details record", body = PrimeDetailsResponse),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal), fields(account_id = principal.account_id, id))]
pub async fn get_prime_details(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PrimeDetailsResponse>, AppError> {
    let model = prime_details::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Prime details record not found".into()))?;
    let catalog = load_catalog(&state.db).await?;

    Ok(Json(PrimeDetailsResponse::new(model, &catalog)))
}

#[utoipa::path(
    get,
    path = "/other_details/",
    tag = "Specimens",
    operation_id = "listOtherDetails",
    summary = "List other details records",
    responses(
        (status = 200, description = "All other details records, oldest first", body = Vec<OtherDetailsResponse>),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal), fields(account_id = principal.account_id))]
pub async fn list_other_details(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<OtherDetailsResponse>>, AppError> {
    let catalog = load_catalog(&state.db).await?;
    let rows = other_details::Entity::find()
        .order_by_asc(other_details::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|m| OtherDetailsResponse::new(m, &catalog))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/other_details/{id}/",
    tag = "Specimens",
    operation_id = "getOtherDetails",
    summary = "Get one other details record",
    params(("id" = i32, Path, description = "Other details ID")),
    responses(
        (status = 200, description = "Other details record", body = OtherDetailsResponse),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal), fields(account_id = principal.account_id, id))]
pub async fn get_other_details(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OtherDetailsResponse>, AppError> {
    let model = other_details::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Other details record not found".into()))?;
    let catalog = load_catalog(&state.db).await?;

    Ok(Json(OtherDetailsResponse::new(model, &catalog)))
}

#[utoipa::path(
    get,
    path = "/get_select_options/",
    tag = "Specimens",
    operation_id = "getSelectOptions",
    summary = "Lookup names for select boxes",
    description = "Every lookup table's names, each list sorted ascending.",
    responses(
        (status = 200, description = "Lookup names", body = SelectOptions),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal), fields(account_id = principal.account_id))]
pub async fn get_select_options(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<SelectOptions>, AppError> {
    let catalog = load_catalog(&state.db).await?;
    Ok(Json(catalog.select_options()))
}

#[utoipa::path(
    post,
    path = "/add_new_data/",
    tag = "Specimens",
    operation_id = "addNewData",
    summary = "Insert a single specimen",
    description = "Admin only. Takes one object keyed like the upload columns and inserts the prime and other details records in one transaction.",
    request_body = NewDataRequest,
    responses(
        (status = 201, description = "Specimen inserted", body = SuccessResponse),
        (status = 400, description = "Row rejected", body = FailureBody),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal, payload), fields(admin_id = principal.account_id))]
pub async fn add_new_data(
    principal: Principal,
    State(state): State<AppState>,
    AppJson(NewDataRequest(payload)): AppJson<NewDataRequest>,
) -> Result<impl IntoResponse, AppError> {
    let row = RawRow::from_json(&payload);

    let txn = state.db.begin().await?;
    let catalog = load_catalog(&txn).await?;
    let store = SeaOrmSpecimenStore::new(&txn);
    let inserted = insert_row(&row, &catalog, &store).await?;
    txn.commit().await?;

    tracing::info!(
        mbtb_code = row.mbtb_code(),
        prime_id = inserted.prime_id,
        "Specimen added"
    );
    Ok((StatusCode::CREATED, Json(SuccessResponse::OK)))
}
