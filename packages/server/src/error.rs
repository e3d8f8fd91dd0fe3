use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::ImportError;
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::{Value, json};

/// Structured error response returned by endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `INVALID_CREDENTIALS`, `PERMISSION_DENIED`,
    /// `METHOD_NOT_ALLOWED`, `NOT_FOUND`, `CONFLICT`, `EMAIL_TAKEN`,
    /// `INTERNAL_ERROR`.
    #[schema(example = "PERMISSION_DENIED")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "You do not have permission to perform this action.")]
    pub message: String,
}

/// Body returned when an upload or a single-record insert is rejected.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FailureBody {
    #[serde(rename = "Response")]
    #[schema(example = "Failure")]
    pub response: &'static str,
    #[serde(rename = "Message")]
    #[schema(example = "Error in prime details, Data uploading failed at mbtb_code: BB99-103")]
    pub message: String,
    /// A message string for file-level failures, a field-to-messages map for
    /// row-level ones.
    #[serde(rename = "Error")]
    #[schema(value_type = Object)]
    pub error: Value,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// No `Authorization` header at all.
    TokenMissing,
    /// `Token` keyword with nothing after it.
    TokenHeaderEmpty,
    /// Wrong keyword or extra words.
    TokenHeaderMalformed,
    TokenInvalid,
    InvalidCredentials,
    PermissionDenied,
    MethodNotAllowed(String),
    NotFound(String),
    Conflict(String),
    EmailTaken,
    Import(ImportError),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::TokenMissing => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "TOKEN_MISSING",
                    message: "Authentication credentials were not provided.".into(),
                },
            ),
            AppError::TokenHeaderEmpty => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "TOKEN_INVALID",
                    message: "Invalid token header. No credentials provided.".into(),
                },
            ),
            AppError::TokenHeaderMalformed => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "TOKEN_INVALID",
                    message: "Invalid token header".into(),
                },
            ),
            AppError::TokenInvalid => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "TOKEN_INVALID",
                    message: "Invalid token".into(),
                },
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "INVALID_CREDENTIALS",
                    message: "Invalid email or password".into(),
                },
            ),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    code: "PERMISSION_DENIED",
                    message: "You do not have permission to perform this action.".into(),
                },
            ),
            AppError::MethodNotAllowed(method) => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorBody {
                    code: "METHOD_NOT_ALLOWED",
                    message: format!("Method \"{method}\" not allowed."),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::EmailTaken => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "EMAIL_TAKEN",
                    message: "An account with this email already exists".into(),
                },
            ),
            AppError::Import(err) => AppError::Internal(err.to_string()).status_and_body(),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

/// File-level failures carry a generic message and the reason as `Error`;
/// row-level failures name the row in `Message` and list field errors.
fn failure_body(err: &ImportError) -> FailureBody {
    match err.field_errors() {
        Some(errors) => FailureBody {
            response: "Failure",
            message: err.to_string(),
            error: json!(errors),
        },
        None => FailureBody {
            response: "Failure",
            message: "Data uploading failed".into(),
            error: Value::String(err.to_string()),
        },
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Import(err) = &self
            && err.is_client_error()
        {
            return (StatusCode::BAD_REQUEST, Json(failure_body(err))).into_response();
        }

        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        AppError::Import(err)
    }
}
