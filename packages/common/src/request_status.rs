#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The single-character approval flag kept on every tissue request.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")
)]
pub enum PendingApproval {
    /// Awaiting a decision.
    #[default]
    #[serde(rename = "Y")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Y"))]
    Yes,
    /// Decided, see the approval and reverted dates.
    #[serde(rename = "N")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "N"))]
    No,
}

/// Lifecycle position of a tissue request, derived from its stored fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Reverted,
}

/// An admin decision on a pending request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Revert,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tissue request is already {current}")]
pub struct TransitionError {
    pub current: RequestStatus,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Reverted => "reverted",
        }
    }

    /// Reads the status from the stored columns. A request is pending until
    /// its flag is cleared; after that the reverted date wins over approval.
    pub fn from_fields(
        pending: PendingApproval,
        approval_date: Option<NaiveDate>,
        reverted_date: Option<NaiveDate>,
    ) -> Self {
        match (pending, approval_date, reverted_date) {
            (PendingApproval::Yes, _, _) => Self::Pending,
            (PendingApproval::No, _, Some(_)) => Self::Reverted,
            (PendingApproval::No, _, None) => Self::Approved,
        }
    }

    /// Only pending requests accept a decision.
    pub fn apply(self, decision: Decision) -> Result<RequestStatus, TransitionError> {
        match (self, decision) {
            (Self::Pending, Decision::Approve) => Ok(Self::Approved),
            (Self::Pending, Decision::Revert) => Ok(Self::Reverted),
            (current, _) => Err(TransitionError { current }),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
