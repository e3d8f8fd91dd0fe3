use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prime_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Business key, distinct from `id`.
    #[sea_orm(unique)]
    pub mbtb_code: String,
    pub sex: String,
    pub age: String,
    pub postmortem_interval: String,
    pub time_in_fix: String,
    pub preservation_method: String,
    /// Nullable in storage; the importer always supplies it.
    pub storage_year: Option<DateTime>,
    pub archive: String,
    #[sea_orm(column_type = "Text")]
    pub clinical_diagnosis: String,

    pub tissue_type_id: i32,
    #[sea_orm(belongs_to, from = "tissue_type_id", to = "id")]
    pub tissue_type: HasOne<super::tissue_type::Entity>,

    pub neuro_diagnosis_id: i32,
    #[sea_orm(belongs_to, from = "neuro_diagnosis_id", to = "id")]
    pub neuro_diagnosis: HasOne<super::neuropathological_diagnosis::Entity>,

    #[sea_orm(has_one)]
    pub other_details: HasOne<super::other_details::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
