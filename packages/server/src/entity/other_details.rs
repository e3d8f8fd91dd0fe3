use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "other_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub prime_details_id: i32,
    #[sea_orm(belongs_to, from = "prime_details_id", to = "id", on_delete = "Cascade")]
    pub prime_details: HasOne<super::prime_details::Entity>,

    pub autopsy_type_id: i32,
    #[sea_orm(belongs_to, from = "autopsy_type_id", to = "id")]
    pub autopsy_type: HasOne<super::autopsy_type::Entity>,

    pub race: String,
    pub duration: i32,
    #[sea_orm(column_type = "Text")]
    pub clinical_details: String,
    #[sea_orm(column_type = "Text")]
    pub cause_of_death: String,
    pub brain_weight: i32,
    #[sea_orm(column_type = "Text")]
    pub neuropathology_summary: String,
    #[sea_orm(column_type = "Text")]
    pub neuropathology_gross: String,
    #[sea_orm(column_type = "Text")]
    pub neuropathology_microscopic: String,
    pub cerad: String,
    pub braak_stage: String,
    pub khachaturian: String,
    pub abc: String,
    pub formalin_fixed: bool,
    pub fresh_frozen: bool,
}

impl ActiveModelBehavior for ActiveModel {}
