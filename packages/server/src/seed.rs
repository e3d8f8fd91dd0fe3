use sea_orm::*;
use tracing::info;

use crate::config::{BootstrapAdmin, LookupSeedConfig};
use crate::entity::{admin_account, autopsy_type, neuropathological_diagnosis, tissue_type};
use crate::utils::hash;

/// Insert configured lookup names that are not present yet.
pub async fn seed_lookups(db: &DatabaseConnection, lookups: &LookupSeedConfig) -> Result<(), DbErr> {
    let mut inserted = 0u32;

    inserted += insert_names(db, &lookups.tissue_types, tissue_type::Column::Name, |name| {
        tissue_type::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
    })
    .await?;
    inserted += insert_names(db, &lookups.autopsy_types, autopsy_type::Column::Name, |name| {
        autopsy_type::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
    })
    .await?;
    inserted += insert_names(
        db,
        &lookups.neuropathological_diagnoses,
        neuropathological_diagnosis::Column::Name,
        |name| neuropathological_diagnosis::ActiveModel {
            name: Set(name),
            ..Default::default()
        },
    )
    .await?;

    if inserted > 0 {
        info!("Seeded {} new lookup names", inserted);
    }
    Ok(())
}

/// Insert each name into one lookup table, skipping names already there.
async fn insert_names<E, A, F>(
    db: &DatabaseConnection,
    names: &[String],
    column: E::Column,
    build: F,
) -> Result<u32, DbErr>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E> + Send,
    F: Fn(String) -> A,
{
    let mut inserted = 0;
    for name in names {
        let result = E::insert(build(name.clone()))
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(column)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;
        inserted += count_insert(result)?;
    }
    Ok(inserted)
}

fn count_insert(result: Result<u64, DbErr>) -> Result<u32, DbErr> {
    match result {
        Ok(rows) => Ok(u32::from(rows > 0)),
        Err(DbErr::RecordNotInserted) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Create the configured admin account unless one with that email exists.
pub async fn seed_admin_account(db: &DatabaseConnection, admin: &BootstrapAdmin) -> anyhow::Result<()> {
    let exists = admin_account::Entity::find()
        .filter(admin_account::Column::Email.eq(&admin.email))
        .count(db)
        .await?
        > 0;
    if exists {
        return Ok(());
    }

    let model = admin_account::ActiveModel {
        email: Set(admin.email.clone()),
        password_hash: Set(hash::hash_password(&admin.password)?),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await?;
    info!(email = %admin.email, "Created bootstrap admin account");
    Ok(())
}
