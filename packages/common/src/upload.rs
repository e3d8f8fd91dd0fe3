use std::collections::HashSet;

use csv::{ReaderBuilder, StringRecord};

use crate::error::ImportError;
use crate::fields::{IMPORT_FIELDS, field_names};
use crate::record::RawRow;

/// An uploaded file as received from the multipart form.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A CSV upload that passed every structural check.
#[derive(Clone, Debug)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl CsvTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Run the structural checks in order (presence, extension, header, row
/// shape) and return the parsed rows. Nothing here touches storage.
pub fn read_upload(file: Option<UploadedFile>) -> Result<CsvTable, ImportError> {
    let file = file.ok_or(ImportError::FileMissing)?;
    if file.bytes.is_empty() {
        return Err(ImportError::FileEmpty);
    }
    if !has_csv_extension(&file.filename) {
        return Err(ImportError::WrongFileType);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file.bytes.as_slice());

    let mut records = reader
        .records()
        .collect::<Result<Vec<StringRecord>, _>>()
        .map_err(|e| ImportError::Malformed(e.to_string()))?
        .into_iter();
    let header = records.next().ok_or(ImportError::NoColumns)?;
    let headers = normalize_header(&header);
    if headers.iter().all(String::is_empty) {
        return Err(ImportError::NoColumns);
    }
    check_header(&headers)?;

    let data: Vec<StringRecord> = records.collect();
    for record in &data {
        if record.len() < IMPORT_FIELDS.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(ImportError::RowTooShort { line });
        }
    }

    let rows = data
        .iter()
        .map(|record| {
            headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect::<RawRow>()
        })
        .collect();

    Ok(CsvTable { headers, rows })
}

fn has_csv_extension(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(".csv")
}

fn normalize_header(record: &StringRecord) -> Vec<String> {
    record
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let name = if i == 0 {
                name.trim_start_matches('\u{feff}')
            } else {
                name
            };
            name.trim().to_string()
        })
        .collect()
}

/// The header must be exactly the catalogue set, each name once.
fn check_header(headers: &[String]) -> Result<(), ImportError> {
    let expected: HashSet<&str> = field_names().collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unexpected = Vec::new();

    for name in headers {
        let name = name.as_str();
        if !expected.contains(name) || !seen.insert(name) {
            unexpected.push(name.to_string());
        }
    }

    let missing: Vec<String> = field_names()
        .filter(|name| !seen.contains(name))
        .map(str::to_string)
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(ImportError::ColumnMismatch {
            missing,
            unexpected,
        })
    }
}
