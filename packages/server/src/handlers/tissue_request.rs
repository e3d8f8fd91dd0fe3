use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use common::{Decision, PendingApproval};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::tissue_request;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::permission::Principal;
use crate::models::tissue_request::{
    CreateTissueRequest, TissueRequestCreated, TissueRequestResponse, TransitionRequest,
    validate_create_tissue_request,
};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/add_new_tissue_requests/",
    tag = "Tissue Requests",
    operation_id = "addNewTissueRequest",
    summary = "Submit a tissue request",
    description = "Records the intake form as pending, received today, and returns its reference number.",
    request_body = CreateTissueRequest,
    responses(
        (status = 201, description = "Request recorded", body = TissueRequestCreated),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal, payload), fields(account_id = principal.account_id))]
pub async fn add_new_tissue_request(
    principal: Principal,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTissueRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_tissue_request(&payload)?;

    let number = Uuid::new_v4().to_string();
    let new_request = tissue_request::ActiveModel {
        tissue_request_number: Set(number.clone()),
        title: Set(payload.title.trim().to_string()),
        first_name: Set(payload.first_name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        institution: Set(payload.institution),
        department_name: Set(payload.department_name),
        city: Set(payload.city),
        province: Set(payload.province),
        postal_code: Set(payload.postal_code),
        phone_number: Set(payload.phone_number),
        fax_number: Set(payload.fax_number),
        project_title: Set(payload.project_title),
        source_of_funding: Set(payload.source_of_funding),
        project_abstract: Set(payload.project_abstract),
        pending_approval: Set(PendingApproval::Yes),
        received_date: Set(Some(Utc::now().date_naive())),
        approval_date: Set(None),
        reverted_date: Set(None),
        ..Default::default()
    };
    let created = new_request.insert(&state.db).await?;

    tracing::info!(id = created.id, %number, "Tissue request received");
    Ok((
        StatusCode::CREATED,
        Json(TissueRequestCreated {
            response: "Success",
            tissue_request_number: number,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/tissue_requests/",
    tag = "Tissue Requests",
    operation_id = "listTissueRequests",
    summary = "List tissue requests",
    description = "Admin only. Newest first.",
    responses(
        (status = 200, description = "Tissue requests", body = Vec<TissueRequestResponse>),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal), fields(admin_id = principal.account_id))]
pub async fn list_tissue_requests(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<TissueRequestResponse>>, AppError> {
    let rows = tissue_request::Entity::find()
        .order_by_desc(tissue_request::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(TissueRequestResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/approve_tissue_request/",
    tag = "Tissue Requests",
    operation_id = "approveTissueRequest",
    summary = "Approve a pending tissue request",
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Request approved", body = TissueRequestResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Unknown request number (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Request already decided (CONFLICT)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal, payload), fields(admin_id = principal.account_id, number = %payload.tissue_request_number))]
pub async fn approve_tissue_request(
    principal: Principal,
    State(state): State<AppState>,
    AppJson(payload): AppJson<TransitionRequest>,
) -> Result<Json<TissueRequestResponse>, AppError> {
    decide(&state, &payload.tissue_request_number, Decision::Approve).await
}

#[utoipa::path(
    post,
    path = "/revert_tissue_request/",
    tag = "Tissue Requests",
    operation_id = "revertTissueRequest",
    summary = "Revert a pending tissue request",
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Request reverted", body = TissueRequestResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Unknown request number (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Request already decided (CONFLICT)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal, payload), fields(admin_id = principal.account_id, number = %payload.tissue_request_number))]
pub async fn revert_tissue_request(
    principal: Principal,
    State(state): State<AppState>,
    AppJson(payload): AppJson<TransitionRequest>,
) -> Result<Json<TissueRequestResponse>, AppError> {
    decide(&state, &payload.tissue_request_number, Decision::Revert).await
}

async fn decide(
    state: &AppState,
    number: &str,
    decision: Decision,
) -> Result<Json<TissueRequestResponse>, AppError> {
    if number.trim().is_empty() {
        return Err(AppError::Validation(
            "tissue_request_number must not be empty".into(),
        ));
    }

    let txn = state.db.begin().await?;
    let request = tissue_request::Entity::find()
        .filter(tissue_request::Column::TissueRequestNumber.eq(number.trim()))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Tissue request not found".into()))?;

    request
        .status()
        .apply(decision)
        .map_err(|e| AppError::Conflict(e.to_string()))?;

    let today = Utc::now().date_naive();
    let mut active: tissue_request::ActiveModel = request.into();
    active.pending_approval = Set(PendingApproval::No);
    match decision {
        Decision::Approve => active.approval_date = Set(Some(today)),
        Decision::Revert => active.reverted_date = Set(Some(today)),
    }
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(id = updated.id, status = %updated.status(), "Tissue request decided");
    Ok(Json(TissueRequestResponse::from(updated)))
}
