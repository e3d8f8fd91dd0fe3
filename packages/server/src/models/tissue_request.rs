use chrono::NaiveDate;
use common::{PendingApproval, RequestStatus};
use serde::{Deserialize, Serialize};

use crate::entity::tissue_request;
use crate::error::AppError;

/// Tissue request intake form.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTissueRequest {
    #[serde(default)]
    #[schema(example = "Dr")]
    pub title: String,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada@example.org")]
    pub email: String,
    pub institution: String,
    pub department_name: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub fax_number: Option<String>,
    pub project_title: String,
    pub source_of_funding: String,
    #[serde(rename = "abstract")]
    pub project_abstract: String,
}

fn check_len(name: &str, value: &str, max: usize, required: bool) -> Result<(), AppError> {
    let len = value.trim().chars().count();
    if required && len == 0 {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }
    if len > max {
        return Err(AppError::Validation(format!(
            "{name} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub fn validate_create_tissue_request(payload: &CreateTissueRequest) -> Result<(), AppError> {
    check_len("title", &payload.title, 10, false)?;
    check_len("first_name", &payload.first_name, 30, true)?;
    check_len("last_name", &payload.last_name, 30, true)?;
    check_len("email", &payload.email, 254, true)?;
    if !payload.email.contains('@') {
        return Err(AppError::Validation("Enter a valid email address".into()));
    }
    check_len("institution", &payload.institution, usize::MAX, true)?;
    check_len("department_name", &payload.department_name, usize::MAX, true)?;
    check_len("city", &payload.city, 30, true)?;
    check_len("province", &payload.province, 30, true)?;
    check_len("postal_code", &payload.postal_code, 10, true)?;
    if let Some(phone) = &payload.phone_number {
        check_len("phone_number", phone, 20, false)?;
    }
    if let Some(fax) = &payload.fax_number {
        check_len("fax_number", fax, 20, false)?;
    }
    check_len("project_title", &payload.project_title, usize::MAX, true)?;
    check_len("source_of_funding", &payload.source_of_funding, usize::MAX, true)?;
    check_len("abstract", &payload.project_abstract, usize::MAX, true)?;
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TissueRequestCreated {
    #[serde(rename = "Response")]
    #[schema(example = "Success")]
    pub response: &'static str,
    #[schema(example = "0b5e0c4e-2f0e-4a53-8f0e-7c1f3f7d9a11")]
    pub tissue_request_number: String,
}

/// Identifies the request an admin decides on.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct TransitionRequest {
    pub tissue_request_number: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TissueRequestResponse {
    pub id: i32,
    pub tissue_request_number: String,
    pub status: RequestStatus,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub institution: String,
    pub department_name: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub phone_number: Option<String>,
    pub fax_number: Option<String>,
    pub project_title: String,
    pub source_of_funding: String,
    #[serde(rename = "abstract")]
    pub project_abstract: String,
    pub pending_approval: PendingApproval,
    pub received_date: Option<NaiveDate>,
    pub approval_date: Option<NaiveDate>,
    pub reverted_date: Option<NaiveDate>,
}

impl From<tissue_request::Model> for TissueRequestResponse {
    fn from(m: tissue_request::Model) -> Self {
        Self {
            status: m.status(),
            id: m.id,
            tissue_request_number: m.tissue_request_number,
            title: m.title,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            institution: m.institution,
            department_name: m.department_name,
            city: m.city,
            province: m.province,
            postal_code: m.postal_code,
            phone_number: m.phone_number,
            fax_number: m.fax_number,
            project_title: m.project_title,
            source_of_funding: m.source_of_funding,
            project_abstract: m.project_abstract,
            pending_approval: m.pending_approval,
            received_date: m.received_date,
            approval_date: m.approval_date,
            reverted_date: m.reverted_date,
        }
    }
}
