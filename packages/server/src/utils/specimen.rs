use common::record::{format_bool, format_timestamp};
use common::{LookupCatalog, LookupKind, RawRow};

use crate::entity::{other_details, prime_details};

/// Render a stored specimen as an import row, resolving lookup ids back to
/// names. A specimen without other details exports blank cells for them.
pub fn to_row(
    prime: &prime_details::Model,
    other: Option<&other_details::Model>,
    catalog: &LookupCatalog,
) -> RawRow {
    let name = |kind, id| catalog.name_of(kind, id).unwrap_or_default().to_string();

    let mut row = RawRow::new();
    row.insert("mbtb_code", prime.mbtb_code.as_str());
    row.insert("sex", prime.sex.as_str());
    row.insert("age", prime.age.as_str());
    row.insert("postmortem_interval", prime.postmortem_interval.as_str());
    row.insert("time_in_fix", prime.time_in_fix.as_str());
    row.insert("preservation_method", prime.preservation_method.as_str());
    row.insert("clinical_diagnosis", prime.clinical_diagnosis.as_str());
    row.insert("storage_year", format_timestamp(prime.storage_year));
    row.insert("tissue_type", name(LookupKind::TissueType, prime.tissue_type_id));
    row.insert(
        "neuropathology_diagnosis",
        name(LookupKind::NeuropathologicalDiagnosis, prime.neuro_diagnosis_id),
    );

    if let Some(other) = other {
        row.insert("autopsy_type", name(LookupKind::AutopsyType, other.autopsy_type_id));
        row.insert("race", other.race.as_str());
        row.insert("duration", other.duration.to_string());
        row.insert("clinical_details", other.clinical_details.as_str());
        row.insert("cause_of_death", other.cause_of_death.as_str());
        row.insert("brain_weight", other.brain_weight.to_string());
        row.insert("neuropathology_summary", other.neuropathology_summary.as_str());
        row.insert("neuropathology_gross", other.neuropathology_gross.as_str());
        row.insert(
            "neuropathology_microscopic",
            other.neuropathology_microscopic.as_str(),
        );
        row.insert("cerad", other.cerad.as_str());
        row.insert("braak_stage", other.braak_stage.as_str());
        row.insert("khachaturian", other.khachaturian.as_str());
        row.insert("abc", other.abc.as_str());
        row.insert("formalin_fixed", format_bool(other.formalin_fixed));
        row.insert("fresh_frozen", format_bool(other.fresh_frozen));
    }

    row
}
