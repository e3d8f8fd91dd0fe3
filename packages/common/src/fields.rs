use crate::lookup::LookupKind;

/// Which of the two specimen records a column belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordGroup {
    /// Columns stored on the prime details record.
    Prime,
    /// Columns stored on the one-to-one other details record.
    Other,
}

/// How a raw CSV cell is coerced before it is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text. `max_len` counts characters; `None` means unbounded.
    Text { blank: bool, max_len: Option<usize> },
    /// Signed 32-bit integer, never blank.
    Integer,
    /// Literal `True` / `False`.
    Boolean,
    /// `YYYY-MM-DD HH:MM:SS`; blank only when `nullable`.
    Timestamp { nullable: bool },
    /// Name resolved against a lookup table.
    Lookup(LookupKind),
}

/// A single importable column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub group: RecordGroup,
    pub kind: FieldKind,
}

const fn text(name: &'static str, group: RecordGroup, blank: bool, max_len: usize) -> FieldSpec {
    FieldSpec {
        name,
        group,
        kind: FieldKind::Text {
            blank,
            max_len: Some(max_len),
        },
    }
}

const fn long_text(name: &'static str, group: RecordGroup) -> FieldSpec {
    FieldSpec {
        name,
        group,
        kind: FieldKind::Text {
            blank: true,
            max_len: None,
        },
    }
}

const fn typed(name: &'static str, group: RecordGroup, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, group, kind }
}

use RecordGroup::{Other, Prime};

/// Every column an upload must carry, in export order.
pub const IMPORT_FIELDS: &[FieldSpec] = &[
    text("mbtb_code", Prime, false, 25),
    text("sex", Prime, false, 10),
    text("age", Prime, false, 10),
    text("postmortem_interval", Prime, false, 50),
    text("time_in_fix", Prime, false, 50),
    text("preservation_method", Prime, false, 50),
    long_text("clinical_diagnosis", Prime),
    typed("storage_year", Prime, FieldKind::Timestamp { nullable: false }),
    typed("tissue_type", Prime, FieldKind::Lookup(LookupKind::TissueType)),
    typed(
        "neuropathology_diagnosis",
        Prime,
        FieldKind::Lookup(LookupKind::NeuropathologicalDiagnosis),
    ),
    typed("autopsy_type", Other, FieldKind::Lookup(LookupKind::AutopsyType)),
    text("race", Other, true, 50),
    typed("duration", Other, FieldKind::Integer),
    long_text("clinical_details", Other),
    long_text("cause_of_death", Other),
    typed("brain_weight", Other, FieldKind::Integer),
    long_text("neuropathology_summary", Other),
    long_text("neuropathology_gross", Other),
    long_text("neuropathology_microscopic", Other),
    text("cerad", Other, true, 50),
    text("braak_stage", Other, true, 50),
    text("khachaturian", Other, true, 50),
    text("abc", Other, true, 50),
    typed("formalin_fixed", Other, FieldKind::Boolean),
    typed("fresh_frozen", Other, FieldKind::Boolean),
];

/// Look up a column by name.
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    IMPORT_FIELDS.iter().find(|f| f.name == name)
}

/// Column names in catalogue order.
pub fn field_names() -> impl Iterator<Item = &'static str> {
    IMPORT_FIELDS.iter().map(|f| f.name)
}

/// Columns that belong to one record group.
pub fn fields_in(group: RecordGroup) -> impl Iterator<Item = &'static FieldSpec> {
    IMPORT_FIELDS.iter().filter(move |f| f.group == group)
}
