use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::fields::{self, FieldKind};
use crate::lookup::LookupService;

/// Field name → validation messages, mirrored into the `Error` member of
/// failure responses.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Accepted timestamp layouts for `storage_year`.
pub const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Layout used when writing timestamps back out.
pub const TIMESTAMP_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default archive flag for newly imported specimens.
pub const DEFAULT_ARCHIVE: &str = "No";

/// One specimen as untyped strings keyed by column name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow(BTreeMap<String, String>);

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The business key, or an empty string when the row lacks one.
    pub fn mbtb_code(&self) -> &str {
        self.get("mbtb_code").map(str::trim).unwrap_or_default()
    }

    /// Build a row from a JSON object.
    ///
    /// Strings pass through, numbers use their decimal form, booleans become
    /// the `True`/`False` literals the CSV format uses and `null` becomes an
    /// empty cell.
    pub fn from_json(object: &serde_json::Map<String, Value>) -> Self {
        let mut row = Self::new();
        for (name, value) in object {
            let cell = match value {
                Value::String(s) => s.clone(),
                Value::Bool(true) => "True".to_string(),
                Value::Bool(false) => "False".to_string(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            row.insert(name.clone(), cell);
        }
        row
    }
}

impl FromIterator<(String, String)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A validated prime details record, ready to insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPrimeRecord {
    pub mbtb_code: String,
    pub sex: String,
    pub age: String,
    pub postmortem_interval: String,
    pub time_in_fix: String,
    pub preservation_method: String,
    pub clinical_diagnosis: String,
    pub storage_year: Option<NaiveDateTime>,
    pub archive: String,
    pub tissue_type_id: i32,
    pub neuro_diagnosis_id: i32,
}

/// A validated other details record. The prime id is supplied at insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewOtherRecord {
    pub autopsy_type_id: i32,
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

impl NewPrimeRecord {
    pub fn from_row(row: &RawRow, lookups: &dyn LookupService) -> Result<Self, FieldErrors> {
        let mut reader = FieldReader::new(row, lookups);
        let record = NewPrimeRecord {
            mbtb_code: reader.text("mbtb_code"),
            sex: reader.text("sex"),
            age: reader.text("age"),
            postmortem_interval: reader.text("postmortem_interval"),
            time_in_fix: reader.text("time_in_fix"),
            preservation_method: reader.text("preservation_method"),
            clinical_diagnosis: reader.text("clinical_diagnosis"),
            storage_year: reader.timestamp("storage_year"),
            archive: DEFAULT_ARCHIVE.to_string(),
            tissue_type_id: reader.lookup("tissue_type"),
            neuro_diagnosis_id: reader.lookup("neuropathology_diagnosis"),
        };
        reader.finish(record)
    }
}

impl NewOtherRecord {
    pub fn from_row(row: &RawRow, lookups: &dyn LookupService) -> Result<Self, FieldErrors> {
        let mut reader = FieldReader::new(row, lookups);
        let record = NewOtherRecord {
            autopsy_type_id: reader.lookup("autopsy_type"),
            race: reader.text("race"),
            duration: reader.integer("duration"),
            clinical_details: reader.text("clinical_details"),
            cause_of_death: reader.text("cause_of_death"),
            brain_weight: reader.integer("brain_weight"),
            neuropathology_summary: reader.text("neuropathology_summary"),
            neuropathology_gross: reader.text("neuropathology_gross"),
            neuropathology_microscopic: reader.text("neuropathology_microscopic"),
            cerad: reader.text("cerad"),
            braak_stage: reader.text("braak_stage"),
            khachaturian: reader.text("khachaturian"),
            abc: reader.text("abc"),
            formalin_fixed: reader.boolean("formalin_fixed"),
            fresh_frozen: reader.boolean("fresh_frozen"),
        };
        reader.finish(record)
    }
}

/// Pulls typed values out of a [`RawRow`], collecting every problem instead
/// of stopping at the first one. Failed cells yield a placeholder that is
/// discarded by [`FieldReader::finish`].
struct FieldReader<'a> {
    row: &'a RawRow,
    lookups: &'a dyn LookupService,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    fn new(row: &'a RawRow, lookups: &'a dyn LookupService) -> Self {
        Self {
            row,
            lookups,
            errors: FieldErrors::new(),
        }
    }

    fn fail(&mut self, name: &str, message: impl Into<String>) {
        self.errors
            .entry(name.to_string())
            .or_default()
            .push(message.into());
    }

    fn cell(&mut self, name: &str) -> Option<&'a str> {
        let row = self.row;
        let cell = row.get(name);
        if cell.is_none() {
            self.fail(name, "This field is required.");
        }
        cell
    }

    fn kind(name: &str) -> FieldKind {
        match fields::field(name) {
            Some(spec) => spec.kind,
            None => unreachable!("`{name}` is not in the import catalogue"),
        }
    }

    fn text(&mut self, name: &str) -> String {
        let FieldKind::Text { blank, max_len } = Self::kind(name) else {
            unreachable!("`{name}` is not a text column");
        };
        let Some(cell) = self.cell(name) else {
            return String::new();
        };
        let value = cell.trim();
        if value.is_empty() && !blank {
            self.fail(name, "This field may not be blank.");
        }
        if let Some(max) = max_len
            && value.chars().count() > max
        {
            self.fail(
                name,
                format!("Ensure this field has no more than {max} characters."),
            );
        }
        value.to_string()
    }

    fn integer(&mut self, name: &str) -> i32 {
        let Some(cell) = self.cell(name) else {
            return 0;
        };
        match cell.trim().parse::<i32>() {
            Ok(value) => value,
            Err(_) => {
                self.fail(name, "A valid integer is required.");
                0
            }
        }
    }

    fn boolean(&mut self, name: &str) -> bool {
        let Some(cell) = self.cell(name) else {
            return false;
        };
        match cell.trim() {
            "True" => true,
            "False" => false,
            _ => {
                self.fail(name, "Must be either \"True\" or \"False\".");
                false
            }
        }
    }

    fn timestamp(&mut self, name: &str) -> Option<NaiveDateTime> {
        let FieldKind::Timestamp { nullable } = Self::kind(name) else {
            unreachable!("`{name}` is not a timestamp column");
        };
        let cell = self.cell(name)?.trim();
        if cell.is_empty() {
            if !nullable {
                self.fail(
                    name,
                    "Datetime has wrong format. Use one of these formats instead: YYYY-MM-DD hh:mm:ss.",
                );
            }
            return None;
        }
        let parsed = TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(cell, fmt).ok());
        if parsed.is_none() {
            self.fail(
                name,
                "Datetime has wrong format. Use one of these formats instead: YYYY-MM-DD hh:mm:ss.",
            );
        }
        parsed
    }

    fn lookup(&mut self, name: &str) -> i32 {
        let FieldKind::Lookup(kind) = Self::kind(name) else {
            unreachable!("`{name}` is not a lookup column");
        };
        let Some(cell) = self.cell(name) else {
            return 0;
        };
        let value = cell.trim();
        if value.is_empty() {
            self.fail(name, "This field may not be null.");
            return 0;
        }
        match self.lookups.resolve(kind, value) {
            Some(id) => id,
            None => {
                self.fail(name, format!("Object with name={value} does not exist."));
                0
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

/// Inverse of the importer's coercion: render stored values back to cells.
pub fn format_timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.format(TIMESTAMP_OUTPUT_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
