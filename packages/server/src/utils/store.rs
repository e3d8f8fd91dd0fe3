use async_trait::async_trait;
use common::{NewOtherRecord, NewPrimeRecord, SpecimenStore, StoreError};
use sea_orm::*;

use crate::entity::{other_details, prime_details};

/// Writes specimens through any sea-orm connection. The import handlers
/// hand it an open transaction so a failed upload leaves nothing behind.
pub struct SeaOrmSpecimenStore<'a, C> {
    conn: &'a C,
}

impl<'a, C> SeaOrmSpecimenStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> SpecimenStore for SeaOrmSpecimenStore<'_, C>
where
    C: ConnectionTrait + Sync,
{
    async fn insert_prime(&self, record: &NewPrimeRecord) -> Result<i32, StoreError> {
        // Checked up front: on Postgres a failed INSERT poisons the transaction.
        let existing = prime_details::Entity::find()
            .filter(prime_details::Column::MbtbCode.eq(&record.mbtb_code))
            .count(self.conn)
            .await
            .map_err(backend)?;
        if existing > 0 {
            return Err(StoreError::Duplicate(record.mbtb_code.clone()));
        }

        let model = prime_details::ActiveModel {
            mbtb_code: Set(record.mbtb_code.clone()),
            sex: Set(record.sex.clone()),
            age: Set(record.age.clone()),
            postmortem_interval: Set(record.postmortem_interval.clone()),
            time_in_fix: Set(record.time_in_fix.clone()),
            preservation_method: Set(record.preservation_method.clone()),
            storage_year: Set(record.storage_year),
            archive: Set(record.archive.clone()),
            clinical_diagnosis: Set(record.clinical_diagnosis.clone()),
            tissue_type_id: Set(record.tissue_type_id),
            neuro_diagnosis_id: Set(record.neuro_diagnosis_id),
            ..Default::default()
        };

        let inserted = model.insert(self.conn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                tracing::debug!("Concurrent import won the race for {}", record.mbtb_code);
                StoreError::Duplicate(record.mbtb_code.clone())
            }
            _ => backend(e),
        })?;

        Ok(inserted.id)
    }

    async fn insert_other(
        &self,
        prime_id: i32,
        record: &NewOtherRecord,
    ) -> Result<i32, StoreError> {
        let model = other_details::ActiveModel {
            prime_details_id: Set(prime_id),
            autopsy_type_id: Set(record.autopsy_type_id),
            race: Set(record.race.clone()),
            duration: Set(record.duration),
            clinical_details: Set(record.clinical_details.clone()),
            cause_of_death: Set(record.cause_of_death.clone()),
            brain_weight: Set(record.brain_weight),
            neuropathology_summary: Set(record.neuropathology_summary.clone()),
            neuropathology_gross: Set(record.neuropathology_gross.clone()),
            neuropathology_microscopic: Set(record.neuropathology_microscopic.clone()),
            cerad: Set(record.cerad.clone()),
            braak_stage: Set(record.braak_stage.clone()),
            khachaturian: Set(record.khachaturian.clone()),
            abc: Set(record.abc.clone()),
            formalin_fixed: Set(record.formalin_fixed),
            fresh_frozen: Set(record.fresh_frozen),
            ..Default::default()
        };

        let inserted = model.insert(self.conn).await.map_err(backend)?;
        Ok(inserted.id)
    }
}

fn backend(err: DbErr) -> StoreError {
    StoreError::Backend(err.to_string())
}
