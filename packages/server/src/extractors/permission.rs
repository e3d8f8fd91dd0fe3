//! Token permission checker.
//!
//! Each protected route group runs one [`PermissionPolicy`] as middleware:
//! the last path segment names the resource, the policy allowlists it per
//! HTTP method, and the `Token <jwt>` header must decode to an account that
//! still exists with the same id and email.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, Method, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use sea_orm::*;
use tracing::{debug, warn};

use crate::entity::{admin_account, user_account};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

const TOKEN_KEYWORD: &str = "Token";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountKind {
    User,
    Admin,
}

/// Which accounts a policy accepts once the resource is allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Audience {
    /// Exactly one of the user or admin lookups must match.
    Member,
    /// The admin lookup must match.
    Admin,
}

#[derive(Debug)]
pub struct PermissionPolicy {
    pub name: &'static str,
    pub get: &'static [&'static str],
    pub post: &'static [&'static str],
    pub audience: Audience,
}

pub const MEMBER_POLICY: PermissionPolicy = PermissionPolicy {
    name: "member",
    get: &["brain_dataset", "other_details", "get_select_options"],
    post: &["add_new_tissue_requests", "download_data"],
    audience: Audience::Member,
};

pub const ADMIN_POLICY: PermissionPolicy = PermissionPolicy {
    name: "admin",
    get: &["tissue_requests"],
    post: &[
        "add_new_data",
        "file_upload",
        "add_user",
        "approve_tissue_request",
        "revert_tissue_request",
    ],
    audience: Audience::Admin,
};

/// The authenticated account, attached to the request on allow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub account_id: i32,
    pub email: String,
    pub kind: AccountKind,
}

/// Final non-empty path segment, skipping a numeric record id:
/// `/brain_dataset/12/` names `brain_dataset`.
pub fn resource_name(path: &str) -> Option<&str> {
    path.split('/')
        .rev()
        .filter(|segment| !segment.is_empty())
        .find(|segment| !segment.bytes().all(|b| b.is_ascii_digit()))
}

impl PermissionPolicy {
    /// Method and resource check. Runs before the token is looked at.
    pub fn permits(&self, method: &Method, path: &str) -> Result<(), AppError> {
        let allowed = match *method {
            Method::GET => self.get,
            Method::POST => self.post,
            _ => return Err(AppError::MethodNotAllowed(method.to_string())),
        };
        match resource_name(path) {
            Some(resource) if allowed.contains(&resource) => Ok(()),
            _ => Err(AppError::PermissionDenied),
        }
    }

    /// Decide on the account lookups for a verified token.
    pub fn select_principal(
        &self,
        user: Option<Principal>,
        admin: Option<Principal>,
    ) -> Result<Principal, AppError> {
        match (self.audience, user, admin) {
            (Audience::Member, Some(principal), None) | (Audience::Member, None, Some(principal)) => {
                Ok(principal)
            }
            (Audience::Admin, _, Some(principal)) => Ok(principal),
            _ => Err(AppError::PermissionDenied),
        }
    }
}

/// Parse `Authorization: Token <jwt>`.
pub fn token_from_header(value: Option<&HeaderValue>) -> Result<&str, AppError> {
    let value = value.ok_or(AppError::TokenMissing)?;
    let value = value.to_str().map_err(|_| AppError::TokenHeaderMalformed)?;

    let mut words = value.split_whitespace();
    match words.next() {
        Some(keyword) if keyword.eq_ignore_ascii_case(TOKEN_KEYWORD) => {}
        _ => return Err(AppError::TokenMissing),
    }
    let token = words.next().ok_or(AppError::TokenHeaderEmpty)?;
    if words.next().is_some() {
        return Err(AppError::TokenHeaderMalformed);
    }
    Ok(token)
}

async fn find_account<C: ConnectionTrait>(
    db: &C,
    claims: &jwt::Claims,
) -> Result<(Option<Principal>, Option<Principal>), DbErr> {
    let user = user_account::Entity::find_by_id(claims.id)
        .filter(user_account::Column::Email.eq(&claims.email))
        .one(db)
        .await?
        .map(|u| Principal {
            account_id: u.id,
            email: u.email,
            kind: AccountKind::User,
        });
    let admin = admin_account::Entity::find_by_id(claims.id)
        .filter(admin_account::Column::Email.eq(&claims.email))
        .one(db)
        .await?
        .map(|a| Principal {
            account_id: a.id,
            email: a.email,
            kind: AccountKind::Admin,
        });
    Ok((user, admin))
}

async fn authorize(
    state: &AppState,
    policy: &PermissionPolicy,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    if let Err(e) = policy.permits(&method, &path) {
        warn!(policy = policy.name, %method, %path, "Request denied: {e:?}");
        return Err(e);
    }

    let token = token_from_header(req.headers().get(AUTHORIZATION)).inspect_err(|e| {
        warn!(policy = policy.name, %method, %path, "Authentication failed: {e:?}");
    })?;
    let claims = jwt::verify(token, &state.config.auth.jwt_secret).map_err(|e| {
        warn!(policy = policy.name, %method, %path, "Token rejected: {e}");
        AppError::TokenInvalid
    })?;

    let (user, admin) = find_account(&state.db, &claims).await?;
    let principal = policy.select_principal(user, admin).inspect_err(|_| {
        warn!(
            policy = policy.name,
            %method,
            %path,
            account_id = claims.id,
            "No single account matches token subject"
        );
    })?;

    debug!(
        policy = policy.name,
        %method,
        %path,
        account_id = principal.account_id,
        kind = ?principal.kind,
        "Request allowed"
    );
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Middleware for routes open to any user or admin account.
pub async fn require_member(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, &MEMBER_POLICY, req, next).await
}

/// Middleware for admin-only routes.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, &ADMIN_POLICY, req, next).await
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| AppError::Internal("route is not behind a permission layer".into()))
    }
}
