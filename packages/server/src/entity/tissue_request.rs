use chrono::NaiveDate;
use common::{PendingApproval, RequestStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tissue_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Public reference handed back to the requester.
    #[sea_orm(unique)]
    pub tissue_request_number: String,

    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub institution: String,
    #[sea_orm(column_type = "Text")]
    pub department_name: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub phone_number: Option<String>,
    pub fax_number: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub project_title: String,
    #[sea_orm(column_type = "Text")]
    pub source_of_funding: String,
    #[sea_orm(column_type = "Text")]
    pub project_abstract: String,

    pub pending_approval: PendingApproval,
    pub received_date: Option<NaiveDate>,
    pub approval_date: Option<NaiveDate>,
    pub reverted_date: Option<NaiveDate>,
}

impl Model {
    pub fn status(&self) -> RequestStatus {
        RequestStatus::from_fields(self.pending_approval, self.approval_date, self.reverted_date)
    }
}

impl ActiveModelBehavior for ActiveModel {}
