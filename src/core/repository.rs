pub mod memory_store;

use async_trait::async_trait;
use std::collections::HashMap;
use crate::assets::domain::model::AssetEntity;
use crate::checkout::domain::model::{CheckoutEntity, CheckoutHistoryEntity};
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::hold::domain::model::HoldEntity;

// Page size used when draining every page of a query.
const DRAIN_PAGE_SIZE: usize = 100;

pub trait Repository<Entity>: Send {
    // create an entity
    fn create(&mut self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity, the stored version must match the entity version
    fn update(&mut self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    fn get(&self, id: &str) -> LibraryResult<Entity>;

    // delete an entity
    fn delete(&mut self, id: &str) -> LibraryResult<usize>;

    // find by attribute equality, an empty predicate matches every row
    fn query(&self, predicate: &HashMap<String, String>,
             page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>>;
}

/// Reads every page of a query.
pub(crate) fn query_all<Entity>(repository: &dyn Repository<Entity>,
                                predicate: &HashMap<String, String>) -> LibraryResult<Vec<Entity>> {
    let mut records = vec![];
    let mut page: Option<String> = None;
    loop {
        let res = repository.query(predicate, page.as_deref(), DRAIN_PAGE_SIZE)?;
        records.extend(res.records);
        match res.next_page {
            Some(next) => page = Some(next),
            None => return Ok(records),
        }
    }
}

pub(crate) fn predicate(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// A unit of work over the circulation tables.
///
/// Writes made through the repositories are only visible to other transactions
/// once [`CirculationTx::commit`] returns. Dropping the transaction discards them.
pub trait CirculationTx: Send {
    fn assets(&mut self) -> &mut dyn Repository<AssetEntity>;
    fn checkouts(&mut self) -> &mut dyn Repository<CheckoutEntity>;
    fn histories(&mut self) -> &mut dyn Repository<CheckoutHistoryEntity>;
    fn holds(&mut self) -> &mut dyn Repository<HoldEntity>;
    fn commit(self: Box<Self>) -> LibraryResult<()>;
}

#[async_trait]
pub trait CirculationStore: Sync + Send {
    // Waits until no other transaction is open, then starts a new one.
    async fn begin(&self) -> LibraryResult<Box<dyn CirculationTx>>;
}
