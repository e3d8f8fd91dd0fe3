use csv::Writer;

use crate::error::ExportError;
use crate::fields::{IMPORT_FIELDS, field_names};
use crate::record::RawRow;

/// Write rows as CSV with the import header, so an export can be uploaded
/// again unchanged. Missing cells are written empty.
pub fn write_csv<'a, I>(rows: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(field_names())?;
    for row in rows {
        writer.write_record(
            IMPORT_FIELDS
                .iter()
                .map(|field| row.get(field.name).unwrap_or_default()),
        )?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}
