use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{ImportError, StoreError};
use crate::lookup::LookupService;
use crate::record::{FieldErrors, NewOtherRecord, NewPrimeRecord, RawRow};
use crate::upload::CsvTable;

/// Persistence seam for specimen rows.
///
/// Implementations are expected to run inside a single unit of work that
/// the caller commits only after the whole import succeeded.
#[async_trait]
pub trait SpecimenStore: Send + Sync {
    /// Insert a prime record and return its id.
    async fn insert_prime(&self, record: &NewPrimeRecord) -> Result<i32, StoreError>;

    /// Insert the other details record owned by `prime_id`.
    async fn insert_other(&self, prime_id: i32, record: &NewOtherRecord)
    -> Result<i32, StoreError>;
}

/// Ids of one inserted specimen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsertedSpecimen {
    pub prime_id: i32,
    pub other_id: i32,
}

/// Outcome of a fully successful import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: Vec<InsertedSpecimen>,
}

impl ImportReport {
    pub fn rows(&self) -> usize {
        self.inserted.len()
    }
}

/// Transform and persist one row: prime first, then its other details.
///
/// The prime record is written before the other details are even coerced,
/// so a row failing both ways reports the prime failure. Undoing the prime
/// write on a later failure is left to the store's unit of work.
pub async fn insert_row(
    row: &RawRow,
    lookups: &dyn LookupService,
    store: &dyn SpecimenStore,
) -> Result<InsertedSpecimen, ImportError> {
    let mbtb_code = row.mbtb_code().to_string();

    let prime = NewPrimeRecord::from_row(row, lookups).map_err(|errors| {
        ImportError::PrimeDetails {
            mbtb_code: mbtb_code.clone(),
            errors,
        }
    })?;
    let prime_id = store
        .insert_prime(&prime)
        .await
        .map_err(|e| row_error(e, &mbtb_code, RowStage::Prime))?;

    let other = NewOtherRecord::from_row(row, lookups).map_err(|errors| {
        ImportError::OtherDetails {
            mbtb_code: mbtb_code.clone(),
            errors,
        }
    })?;
    let other_id = store
        .insert_other(prime_id, &other)
        .await
        .map_err(|e| row_error(e, &mbtb_code, RowStage::Other))?;

    debug!(%mbtb_code, prime_id, other_id, "Inserted specimen");
    Ok(InsertedSpecimen { prime_id, other_id })
}

/// Insert every row in file order, stopping at the first failure.
pub async fn import_table(
    table: &CsvTable,
    lookups: &dyn LookupService,
    store: &dyn SpecimenStore,
) -> Result<ImportReport, ImportError> {
    let mut inserted = Vec::with_capacity(table.len());
    for (index, row) in table.rows.iter().enumerate() {
        match insert_row(row, lookups, store).await {
            Ok(ids) => inserted.push(ids),
            Err(e) => {
                warn!(row = index + 1, mbtb_code = row.mbtb_code(), "Import aborted: {e}");
                return Err(e);
            }
        }
    }
    info!(rows = inserted.len(), "Import finished");
    Ok(ImportReport { inserted })
}

#[derive(Clone, Copy)]
enum RowStage {
    Prime,
    Other,
}

fn row_error(err: StoreError, mbtb_code: &str, stage: RowStage) -> ImportError {
    let errors = match err {
        StoreError::Backend(detail) => return ImportError::Store(detail),
        StoreError::Duplicate(_) => FieldErrors::from([(
            "mbtb_code".to_string(),
            vec!["prime details with this mbtb code already exists.".to_string()],
        )]),
        StoreError::Rejected(errors) => errors,
    };
    let mbtb_code = mbtb_code.to_string();
    match stage {
        RowStage::Prime => ImportError::PrimeDetails { mbtb_code, errors },
        RowStage::Other => ImportError::OtherDetails { mbtb_code, errors },
    }
}
