use std::cmp;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound::{Excluded, Unbounded};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;

const MAX_PAGE_SIZE: usize = 500;

// MemoryRecord is implemented by entities that can be stored in a MemoryTable
pub(crate) trait MemoryRecord: Identifiable + Clone {
    // returns the attribute value used to match query predicates
    fn attribute(&self, name: &str) -> Option<String>;

    fn set_version(&mut self, version: i64);
}

// MemoryTable keeps rows keyed by id so that page tokens are simply the last id returned.
#[derive(Debug, Clone)]
pub(crate) struct MemoryTable<E> {
    name: String,
    rows: BTreeMap<String, E>,
}

impl<E: MemoryRecord> MemoryTable<E> {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: BTreeMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    fn matches(entity: &E, predicate: &HashMap<String, String>) -> bool {
        predicate.iter().all(|(k, v)| entity.attribute(k).as_deref() == Some(v.as_str()))
    }
}

impl<E: MemoryRecord> Repository<E> for MemoryTable<E> {
    fn create(&mut self, entity: &E) -> LibraryResult<usize> {
        let id = entity.id();
        if self.rows.contains_key(&id) {
            return Err(LibraryError::duplicate_key(
                format!("{} already contains {}", self.name, id).as_str()));
        }
        self.rows.insert(id, entity.clone());
        Ok(1)
    }

    fn update(&mut self, entity: &E) -> LibraryResult<usize> {
        let id = entity.id();
        let existing = self.rows.get_mut(&id).ok_or_else(|| LibraryError::not_found(
            format!("{} not found for {}", self.name, id).as_str()))?;
        if existing.version() != entity.version() {
            return Err(LibraryError::unavailable(
                format!("{} {} was modified, expected version {} but found {}",
                        self.name, id, entity.version(), existing.version()).as_str(),
                Some("409".to_string()), false));
        }
        let mut updated = entity.clone();
        updated.set_version(entity.version() + 1);
        *existing = updated;
        Ok(1)
    }

    fn get(&self, id: &str) -> LibraryResult<E> {
        self.rows.get(id).cloned().ok_or_else(|| LibraryError::not_found(
            format!("{} not found for {}", self.name, id).as_str()))
    }

    fn delete(&mut self, id: &str) -> LibraryResult<usize> {
        self.rows.remove(id).map(|_| 1).ok_or_else(|| LibraryError::not_found(
            format!("{} not found for {}", self.name, id).as_str()))
    }

    fn query(&self, predicate: &HashMap<String, String>,
             page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<E>> {
        let limit = cmp::max(1, cmp::min(page_size, MAX_PAGE_SIZE));
        let start = match page {
            Some(token) => Excluded(token.to_string()),
            None => Unbounded,
        };
        let mut matching = self.rows.range((start, Unbounded))
            .filter(|(_, entity)| Self::matches(entity, predicate));
        let records: Vec<E> = matching.by_ref().take(limit).map(|(_, entity)| entity.clone()).collect();
        let next_page = if matching.next().is_some() {
            records.last().map(|entity| entity.id())
        } else {
            None
        };
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }
}
