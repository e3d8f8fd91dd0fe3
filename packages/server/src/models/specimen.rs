use common::LookupCatalog;
use common::LookupKind;
use common::record::format_timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::{other_details, prime_details};

/// `{"Response": "Success"}`
#[derive(Serialize, utoipa::ToSchema)]
pub struct SuccessResponse {
    #[serde(rename = "Response")]
    #[schema(example = "Success")]
    pub response: &'static str,
}

impl SuccessResponse {
    pub const OK: SuccessResponse = SuccessResponse {
        response: "Success",
    };
}

/// A prime details record with lookup ids resolved to names.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PrimeDetailsResponse {
    pub id: i32,
    #[schema(example = "BB99-103")]
    pub mbtb_code: String,
    pub sex: String,
    pub age: String,
    pub postmortem_interval: String,
    pub time_in_fix: String,
    pub preservation_method: String,
    /// `YYYY-MM-DD hh:mm:ss`, empty when unset.
    #[schema(example = "2019-01-01 00:00:00")]
    pub storage_year: String,
    pub archive: String,
    pub clinical_diagnosis: String,
    #[schema(example = "Brain")]
    pub tissue_type: Option<String>,
    #[schema(example = "Mixed AD VAD")]
    pub neuropathology_diagnosis: Option<String>,
}

impl PrimeDetailsResponse {
    pub fn new(model: prime_details::Model, catalog: &LookupCatalog) -> Self {
        Self {
            tissue_type: catalog
                .name_of(LookupKind::TissueType, model.tissue_type_id)
                .map(str::to_string),
            neuropathology_diagnosis: catalog
                .name_of(LookupKind::NeuropathologicalDiagnosis, model.neuro_diagnosis_id)
                .map(str::to_string),
            id: model.id,
            mbtb_code: model.mbtb_code,
            sex: model.sex,
            age: model.age,
            postmortem_interval: model.postmortem_interval,
            time_in_fix: model.time_in_fix,
            preservation_method: model.preservation_method,
            storage_year: format_timestamp(model.storage_year),
            archive: model.archive,
            clinical_diagnosis: model.clinical_diagnosis,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct OtherDetailsResponse {
    pub id: i32,
    pub prime_details_id: i32,
    #[schema(example = "Brain")]
    pub autopsy_type: Option<String>,
    pub race: String,
    pub duration: i32,
    pub clinical_details: String,
    pub cause_of_death: String,
    pub brain_weight: i32,
    pub neuropathology_summary: String,
    pub neuropathology_gross: String,
    pub neuropathology_microscopic: String,
    pub cerad: String,
    pub braak_stage: String,
    pub khachaturian: String,
    pub abc: String,
    pub formalin_fixed: bool,
    pub fresh_frozen: bool,
}

impl OtherDetailsResponse {
    pub fn new(model: other_details::Model, catalog: &LookupCatalog) -> Self {
        Self {
            autopsy_type: catalog
                .name_of(LookupKind::AutopsyType, model.autopsy_type_id)
                .map(str::to_string),
            id: model.id,
            prime_details_id: model.prime_details_id,
            race: model.race,
            duration: model.duration,
            clinical_details: model.clinical_details,
            cause_of_death: model.cause_of_death,
            brain_weight: model.brain_weight,
            neuropathology_summary: model.neuropathology_summary,
            neuropathology_gross: model.neuropathology_gross,
            neuropathology_microscopic: model.neuropathology_microscopic,
            cerad: model.cerad,
            braak_stage: model.braak_stage,
            khachaturian: model.khachaturian,
            abc: model.abc,
            formalin_fixed: model.formalin_fixed,
            fresh_frozen: model.fresh_frozen,
        }
    }
}

/// One specimen keyed by upload column name. Booleans and numbers may be
/// sent as JSON values or as their CSV spelling.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct NewDataRequest(pub Map<String, Value>);

/// Request body for `/download_data/`.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct DownloadRequest {
    /// Restrict the export to these codes; omit to export everything.
    #[schema(example = json!(["BB99-103"]))]
    #[serde(default)]
    pub mbtb_codes: Option<Vec<String>>,
}
