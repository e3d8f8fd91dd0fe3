use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{admin_account, user_account};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::permission::Principal;
use crate::models::auth::{
    AccountResponse, AddUserRequest, LoginRequest, LoginResponse, validate_add_user_request,
    validate_login_request,
};
use crate::state::AppState;
use crate::utils::{hash, jwt};

#[utoipa::path(
    post,
    path = "/login/",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in as a user",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Wrong email or password (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let user = user_account::Entity::find()
        .filter(user_account::Column::Email.eq(payload.email.trim()))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    check_password(&payload.password, &user.password_hash)?;
    issue_token(&state, user.id, user.email)
}

#[utoipa::path(
    post,
    path = "/admin_login/",
    tag = "Auth",
    operation_id = "adminLogin",
    summary = "Log in as an admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Wrong email or password (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn admin_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let admin = admin_account::Entity::find()
        .filter(admin_account::Column::Email.eq(payload.email.trim()))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    check_password(&payload.password, &admin.password_hash)?;
    issue_token(&state, admin.id, admin.email)
}

#[utoipa::path(
    post,
    path = "/add_user/",
    tag = "Auth",
    operation_id = "addUser",
    summary = "Create a user account",
    description = "Admin only. The new account can log in through `/login/` and read the dataset.",
    request_body = AddUserRequest,
    responses(
        (status = 201, description = "User created", body = AccountResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 403, description = "Forbidden (TOKEN_MISSING, TOKEN_INVALID, PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Email already registered (EMAIL_TAKEN)", body = ErrorBody),
    ),
    security(("token" = [])),
)]
#[instrument(skip(state, principal, payload), fields(admin_id = principal.account_id, email = %payload.email))]
pub async fn add_user(
    principal: Principal,
    State(state): State<AppState>,
    AppJson(payload): AppJson<AddUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_add_user_request(&payload)?;

    let password_hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = user_account::ActiveModel {
        email: Set(payload.email.trim().to_string()),
        password_hash: Set(password_hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let user = new_user.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::EmailTaken,
        _ => AppError::from(e),
    })?;

    tracing::info!(user_id = user.id, "User account created");
    Ok((StatusCode::CREATED, Json(AccountResponse::from(user))))
}

fn check_password(password: &str, stored: &str) -> Result<(), AppError> {
    let is_valid = hash::verify_password(password, stored)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;
    if is_valid {
        Ok(())
    } else {
        Err(AppError::InvalidCredentials)
    }
}

fn issue_token(state: &AppState, id: i32, email: String) -> Result<Json<LoginResponse>, AppError> {
    let auth = &state.config.auth;
    let token = jwt::sign(id, &email, &auth.jwt_secret, auth.token_ttl_hours)
        .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    Ok(Json(LoginResponse { token, id, email }))
}
