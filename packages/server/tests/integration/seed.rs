use mbtb_server::config::LookupSeedConfig;
use mbtb_server::entity::{autopsy_type, neuropathological_diagnosis, tissue_type};
use mbtb_server::seed::seed_lookups;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::common::TestApp;

#[tokio::test]
async fn seeding_again_skips_existing_names() {
    let app = TestApp::spawn().await;
    let lookups = LookupSeedConfig {
        tissue_types: vec!["Brain".into(), "Cerebellum".into()],
        autopsy_types: vec!["Full body".into()],
        neuropathological_diagnoses: vec!["Normal".into(), "Lewy body disease".into()],
    };

    seed_lookups(&app.db, &lookups).await.unwrap();
    seed_lookups(&app.db, &lookups).await.unwrap();

    assert_eq!(tissue_type::Entity::find().count(&app.db).await.unwrap(), 3);
    assert_eq!(autopsy_type::Entity::find().count(&app.db).await.unwrap(), 2);
    assert_eq!(
        neuropathological_diagnosis::Entity::find()
            .count(&app.db)
            .await
            .unwrap(),
        4
    );
}
