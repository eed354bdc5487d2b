//! InMemoryRepository - Vec-backed record collection.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use super::{Record, RepositoryError};
use crate::id;

/// In-memory repository over an insertion-ordered `Vec`.
///
/// Writers are serialized by the lock; readers get clones. Clone-friendly via
/// Arc, so clones share the same collection.
pub struct InMemoryRepository<E> {
    records: Arc<RwLock<Vec<E>>>,
}

impl<E> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<E: Record> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Record> InMemoryRepository<E> {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// Create a repository preloaded with existing records, kept in the given order.
    pub fn from_records(records: Vec<E>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    // A panicking writer cannot leave a half-applied record behind (merges are
    // applied to a copy first), so a poisoned lock still guards valid state.
    fn read(&self) -> RwLockReadGuard<'_, Vec<E>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<E>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clone every record matching the predicate, in collection order.
    pub fn find(&self, predicate: impl Fn(&E) -> bool) -> Vec<E> {
        self.read()
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Clone the first record matching the predicate.
    pub fn find_one(&self, predicate: impl Fn(&E) -> bool) -> Option<E> {
        self.read().iter().find(|record| predicate(record)).cloned()
    }

    /// Clone every record.
    pub fn all(&self) -> Vec<E> {
        self.read().clone()
    }

    /// Get a record by identifier.
    pub fn get(&self, id: &str) -> Result<E, RepositoryError> {
        self.find_one(|record| record.id() == id)
            .ok_or_else(|| not_found::<E>(id))
    }

    /// Validate a draft, assign a fresh identifier and timestamp, and append.
    ///
    /// Returns a clone of the stored record.
    pub fn create(&self, draft: E::Draft) -> Result<E, RepositoryError> {
        let mut records = self.write();

        let id = loop {
            let candidate = id::generate();
            if !records.iter().any(|record| record.id() == candidate) {
                break candidate;
            }
        };

        let record = E::create(id, Utc::now(), draft)?;
        records.push(record.clone());

        debug!(collection = E::COLLECTION, id = record.id(), "record created");
        Ok(record)
    }

    /// Merge a patch over the record with the given identifier.
    pub fn update(&self, id: &str, patch: E::Patch) -> Result<(), RepositoryError> {
        let mut records = self.write();

        let slot = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| not_found::<E>(id))?;

        let mut updated = slot.clone();
        updated.merge(patch)?;
        *slot = updated;

        debug!(collection = E::COLLECTION, id, "record updated");
        Ok(())
    }

    /// Remove the record with the given identifier.
    ///
    /// The collection is rebuilt from the remaining records rather than spliced.
    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut records = self.write();

        if !records.iter().any(|record| record.id() == id) {
            return Err(not_found::<E>(id));
        }

        let remaining: Vec<E> = records
            .iter()
            .filter(|record| record.id() != id)
            .cloned()
            .collect();
        *records = remaining;

        debug!(collection = E::COLLECTION, id, "record deleted");
        Ok(())
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the repository is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

fn not_found<E: Record>(id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        collection: E::COLLECTION,
        id: id.to_string(),
    }
}
