use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Request body for user and admin login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "curator@example.org")]
    pub email: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("Email must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Send back as `Authorization: Token <token>`.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "curator@example.org")]
    pub email: String,
}

/// Request body for creating a user account.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddUserRequest {
    #[schema(example = "researcher@example.org")]
    pub email: String,
    /// 8-128 characters.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_add_user_request(payload: &AddUserRequest) -> Result<(), AppError> {
    let email = payload.email.trim();
    if email.is_empty() || email.chars().count() > 254 {
        return Err(AppError::Validation("Email must be 1-254 characters".into()));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => return Err(AppError::Validation("Enter a valid email address".into())),
    }
    if payload.password.len() < 8 || payload.password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AccountResponse {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = "researcher@example.org")]
    pub email: String,
}

impl From<crate::entity::user_account::Model> for AccountResponse {
    fn from(user: crate::entity::user_account::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}
