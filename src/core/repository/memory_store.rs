use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;
use crate::assets::domain::model::AssetEntity;
use crate::checkout::domain::model::{CheckoutEntity, CheckoutHistoryEntity};
use crate::core::library::LibraryResult;
use crate::core::repository::{CirculationStore, CirculationTx, Repository};
use crate::hold::domain::model::HoldEntity;
use crate::utils::memory::MemoryTable;

#[derive(Debug, Clone)]
pub(crate) struct Tables {
    assets: MemoryTable<AssetEntity>,
    checkouts: MemoryTable<CheckoutEntity>,
    histories: MemoryTable<CheckoutHistoryEntity>,
    holds: MemoryTable<HoldEntity>,
}

impl Tables {
    fn new() -> Self {
        Self {
            assets: MemoryTable::new("assets"),
            checkouts: MemoryTable::new("checkouts"),
            histories: MemoryTable::new("checkout_histories"),
            holds: MemoryTable::new("holds"),
        }
    }
}

// MemoryStore keeps every circulation table in process. Only one transaction is open at a
// time, which serializes all operations on all assets.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// Writes go to a private copy of the tables which replaces the shared tables on commit.
struct MemoryTx {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

impl CirculationTx for MemoryTx {
    fn assets(&mut self) -> &mut dyn Repository<AssetEntity> {
        &mut self.working.assets
    }

    fn checkouts(&mut self) -> &mut dyn Repository<CheckoutEntity> {
        &mut self.working.checkouts
    }

    fn histories(&mut self) -> &mut dyn Repository<CheckoutHistoryEntity> {
        &mut self.working.histories
    }

    fn holds(&mut self) -> &mut dyn Repository<HoldEntity> {
        &mut self.working.holds
    }

    fn commit(self: Box<Self>) -> LibraryResult<()> {
        let MemoryTx { mut guard, working } = *self;
        debug!(assets = working.assets.len(), checkouts = working.checkouts.len(),
            histories = working.histories.len(), holds = working.holds.len(), "committed circulation tables");
        *guard = working;
        Ok(())
    }
}

#[async_trait]
impl CirculationStore for MemoryStore {
    async fn begin(&self) -> LibraryResult<Box<dyn CirculationTx>> {
        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTx { guard, working }))
    }
}

#[cfg(test)]
mod tests {
    use crate::assets::domain::model::AssetEntity;
    use crate::core::library::AssetStatus;
    use crate::core::repository::CirculationStore;
    use crate::core::repository::memory_store::MemoryStore;

    #[tokio::test]
    async fn test_should_commit_writes() {
        let store = MemoryStore::new();
        let asset = AssetEntity::new("Dune", AssetStatus::Available);
        let mut tx = store.begin().await.expect("should begin");
        tx.assets().create(&asset).expect("should create");
        tx.commit().expect("should commit");

        let mut tx = store.begin().await.expect("should begin");
        let loaded = tx.assets().get(asset.asset_id.as_str()).expect("should get");
        assert_eq!(asset, loaded);
    }

    #[tokio::test]
    async fn test_should_discard_uncommitted_writes() {
        let store = MemoryStore::new();
        let asset = AssetEntity::new("Dune", AssetStatus::Available);
        {
            let mut tx = store.begin().await.expect("should begin");
            tx.assets().create(&asset).expect("should create");
        }
        let mut tx = store.begin().await.expect("should begin");
        assert!(tx.assets().get(asset.asset_id.as_str()).is_err());
    }

    #[tokio::test]
    async fn test_should_serialize_transactions() {
        let store = MemoryStore::new();
        let tx = store.begin().await.expect("should begin");
        let other = store.clone();
        let waiting = tokio::spawn(async move {
            other.begin().await.map(|_| ())
        });
        tokio::task::yield_now().await;
        assert!(!waiting.is_finished());
        drop(tx);
        waiting.await.expect("should join").expect("should begin after release");
    }
}
