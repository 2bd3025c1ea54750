pub mod check_in_item_cmd;
pub mod check_out_item_cmd;
pub mod mark_found_cmd;
pub mod mark_lost_cmd;
pub mod place_hold_cmd;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;
    use crate::assets::domain::model::AssetEntity;
    use crate::circulation::domain::CirculationService;
    use crate::circulation::factory::create_circulation_service;
    use crate::core::domain::Configuration;
    use crate::core::library::AssetStatus;
    use crate::core::repository::CirculationStore;
    use crate::core::repository::memory_store::MemoryStore;
    use crate::gateway::GatewayPublisherVia;
    use crate::patrons::domain::directory::MemoryPatronDirectory;
    use crate::patrons::dto::PatronDto;

    // A circulation service over in-process storage, shared by the command tests.
    pub(crate) struct CommandFixture {
        pub(crate) svc: Arc<dyn CirculationService>,
        store: Arc<MemoryStore>,
        directory: Arc<MemoryPatronDirectory>,
    }

    impl CommandFixture {
        pub(crate) fn new() -> Self {
            let store = Arc::new(MemoryStore::new());
            let directory = Arc::new(MemoryPatronDirectory::new());
            let svc = create_circulation_service(&Configuration::new("test"), store.clone(),
                                                 directory.clone(), GatewayPublisherVia::Memory);
            Self { svc, store, directory }
        }

        pub(crate) async fn add_asset(&self) -> String {
            let asset = AssetEntity::new("Dune", AssetStatus::Available);
            let mut tx = self.store.begin().await.expect("should begin");
            tx.assets().create(&asset).expect("should create asset");
            tx.commit().expect("should commit");
            asset.asset_id
        }

        pub(crate) async fn add_card(&self) -> String {
            let patron = PatronDto::new(uuid::Uuid::new_v4().to_string().as_str(), "Frank", "Herbert", "frank@org.cc");
            let card_id = patron.card_id.to_string();
            self.directory.add_patron(patron).await;
            card_id
        }
    }
}
