use thiserror::Error;

use crate::record::FieldErrors;

/// Why an upload (or a single-record insert) was rejected.
///
/// The display strings are the user-facing messages returned to clients.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File not found, please upload CSV file")]
    FileMissing,

    #[error("File can't be empty, Please upload again.")]
    FileEmpty,

    #[error("Wrong file type, please upload CSV file")]
    WrongFileType,

    /// The header row carries no column names at all.
    #[error("Error in file size, please upload valid file.")]
    NoColumns,

    #[error("Unable to read CSV file: {0}")]
    Malformed(String),

    #[error(
        "Column names don't match with following: {}, Please try again with valid names.",
        quoted_list(.missing, .unexpected)
    )]
    ColumnMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// `line` is the 1-based CSV line of the first short row.
    #[error("Not enough elements are present in single row.")]
    RowTooShort { line: u64 },

    #[error("Error in prime details, Data uploading failed at mbtb_code: {mbtb_code}")]
    PrimeDetails {
        mbtb_code: String,
        errors: FieldErrors,
    },

    #[error("Error in other details, Data uploading failed at mbtb_code: {mbtb_code}")]
    OtherDetails {
        mbtb_code: String,
        errors: FieldErrors,
    },

    /// The backing store failed for a reason unrelated to the data.
    #[error("specimen store failure: {0}")]
    Store(String),
}

impl ImportError {
    /// True for failures caused by the uploaded content rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Store(_))
    }

    /// Per-field messages for row-level failures.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::PrimeDetails { errors, .. } | Self::OtherDetails { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// Renders names the way the column-mismatch message expects: `['a', 'b']`.
/// Missing columns are reported first; unexpected ones only when nothing is
/// missing (e.g. a duplicated header).
fn quoted_list(missing: &[String], unexpected: &[String]) -> String {
    let names = if missing.is_empty() { unexpected } else { missing };
    let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Failures reported by a [`SpecimenStore`](crate::import::SpecimenStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("prime details with this mbtb code already exists: {0}")]
    Duplicate(String),

    /// The store refused a value; keyed like coercion errors.
    #[error("record rejected by the store")]
    Rejected(FieldErrors),

    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV buffer: {0}")]
    Io(#[from] std::io::Error),
}
