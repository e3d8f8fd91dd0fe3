use common::{LookupCatalog, LookupKind};
use sea_orm::*;

use crate::entity::{autopsy_type, neuropathological_diagnosis, tissue_type};

/// Snapshot all three lookup tables into an in-memory catalogue.
pub async fn load_catalog<C: ConnectionTrait>(db: &C) -> Result<LookupCatalog, DbErr> {
    let mut catalog = LookupCatalog::new();

    for row in tissue_type::Entity::find().all(db).await? {
        catalog.insert(LookupKind::TissueType, row.name, row.id);
    }
    for row in autopsy_type::Entity::find().all(db).await? {
        catalog.insert(LookupKind::AutopsyType, row.name, row.id);
    }
    for row in neuropathological_diagnosis::Entity::find().all(db).await? {
        catalog.insert(LookupKind::NeuropathologicalDiagnosis, row.name, row.id);
    }

    Ok(catalog)
}
