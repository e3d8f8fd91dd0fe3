pub mod error;
pub mod export;
pub mod fields;
pub mod import;
pub mod lookup;
pub mod record;
pub mod request_status;
pub mod upload;

pub use error::{ExportError, ImportError, StoreError};
pub use import::{ImportReport, InsertedSpecimen, SpecimenStore, import_table, insert_row};
pub use lookup::{LookupCatalog, LookupKind, LookupService, SelectOptions};
pub use record::{FieldErrors, NewOtherRecord, NewPrimeRecord, RawRow};
pub use request_status::{Decision, PendingApproval, RequestStatus};
pub use upload::{CsvTable, UploadedFile, read_upload};
