use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use estate_core::ServiceError;

use crate::model::Property;

/// Record store: exclusive owner of the property collection.
///
/// Records keep insertion order. Every mutation is applied atomically with
/// respect to the others, so concurrent create/update/delete against the
/// same identifier are serialized.
pub trait RecordStore: Send + Sync {
    /// All records, in insertion order.
    fn list(&self) -> Result<Vec<Property>, ServiceError>;

    /// The record with this id, or `None`.
    fn get(&self, id: &str) -> Result<Option<Property>, ServiceError>;

    /// Append a record. Returns `Conflict` if the id is already taken.
    fn insert(&self, record: Property) -> Result<Property, ServiceError>;

    /// Mutate the record with this id in place and return the result.
    /// Returns `None` (and never calls `apply`) when no record matches.
    fn update(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut Property),
    ) -> Result<Option<Property>, ServiceError>;

    /// Remove the record with this id. Returns whether a removal occurred.
    fn remove(&self, id: &str) -> Result<bool, ServiceError>;

    /// Number of records.
    fn len(&self) -> Result<usize, ServiceError>;

    fn is_empty(&self) -> Result<bool, ServiceError> {
        Ok(self.len()? == 0)
    }

    /// Replace the whole collection (used to load the seed file).
    fn replace_all(&self, records: Vec<Property>) -> Result<(), ServiceError>;
}

/// In-memory record store. Nothing is written back to disk.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Property>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Property>>, ServiceError> {
        self.records
            .read()
            .map_err(|_| ServiceError::Internal("record store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Property>>, ServiceError> {
        self.records
            .write()
            .map_err(|_| ServiceError::Internal("record store lock poisoned".into()))
    }
}

impl RecordStore for MemoryStore {
    fn list(&self) -> Result<Vec<Property>, ServiceError> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: &str) -> Result<Option<Property>, ServiceError> {
        Ok(self.read()?.iter().find(|p| p.id == id).cloned())
    }

    fn insert(&self, record: Property) -> Result<Property, ServiceError> {
        let mut records = self.write()?;
        if records.iter().any(|p| p.id == record.id) {
            return Err(ServiceError::Conflict(format!(
                "property '{}' already exists",
                record.id
            )));
        }
        records.push(record.clone());
        Ok(record)
    }

    fn update(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut Property),
    ) -> Result<Option<Property>, ServiceError> {
        let mut records = self.write()?;
        let Some(record) = records.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        apply(record);
        Ok(Some(record.clone()))
    }

    fn remove(&self, id: &str) -> Result<bool, ServiceError> {
        let mut records = self.write()?;
        match records.iter().position(|p| p.id == id) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn len(&self) -> Result<usize, ServiceError> {
        Ok(self.read()?.len())
    }

    fn replace_all(&self, records: Vec<Property>) -> Result<(), ServiceError> {
        *self.write()? = records;
        Ok(())
    }
}
