use std::sync::Arc;

use estate_core::{ServiceError, new_id, next_timestamp, now};
use tracing::{debug, info};

use crate::model::{NewProperty, Property, PropertyPatch};
use crate::store::RecordStore;

/// Property service: business operations over the record store.
///
/// Absent records are reported as `None`/`false`, never as errors; the
/// HTTP layer decides what an absence means for the caller.
pub struct PropertyService {
    store: Arc<dyn RecordStore>,
}

impl PropertyService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// All properties, in insertion order.
    pub fn find_all(&self) -> Result<Vec<Property>, ServiceError> {
        self.store.list()
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Property>, ServiceError> {
        self.store.get(id)
    }

    /// Store a new property with a fresh id and `createdAt == updatedAt`.
    pub fn create(&self, payload: NewProperty) -> Result<Property, ServiceError> {
        let record = payload.into_property(new_id(), now());
        let record = self.store.insert(record)?;
        info!(id = %record.id, city = %record.city, "property created");
        Ok(record)
    }

    /// Merge the supplied fields into an existing property.
    ///
    /// `updatedAt` always moves forward, even for an empty patch; `id` and
    /// `createdAt` are never touched. Returns `None` if no property matches.
    pub fn update(
        &self,
        id: &str,
        patch: &PropertyPatch,
    ) -> Result<Option<Property>, ServiceError> {
        let updated = self.store.update(id, &mut |record| {
            patch.apply_to(record);
            record.updated_at = next_timestamp(record.updated_at);
        })?;
        match &updated {
            Some(record) => info!(id = %record.id, "property updated"),
            None => debug!(id, "update skipped, no such property"),
        }
        Ok(updated)
    }

    /// Remove a property. Returns whether one was removed.
    pub fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let removed = self.store.remove(id)?;
        if removed {
            info!(id, "property deleted");
        } else {
            debug!(id, "delete skipped, no such property");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::collections::HashSet;

    fn service() -> PropertyService {
        PropertyService::new(Arc::new(MemoryStore::new()))
    }

    fn loft() -> NewProperty {
        NewProperty {
            title: "Loft".into(),
            city: "Paris".into(),
            price: 300_000.0,
            surface: 45.0,
            description: None,
        }
    }

    #[test]
    fn create_assigns_id_and_timestamps() {
        let svc = service();
        let p = svc.create(loft()).unwrap();
        assert_eq!(p.id.len(), 32);
        assert_eq!(p.created_at, p.updated_at);
        assert_eq!(p.title, "Loft");
        assert!(p.description.is_none());
    }

    #[test]
    fn rapid_creates_get_distinct_ids() {
        let svc = service();
        let ids: HashSet<String> = (0..500).map(|_| svc.create(loft()).unwrap().id).collect();
        assert_eq!(ids.len(), 500);
        assert_eq!(svc.find_all().unwrap().len(), 500);
    }

    #[test]
    fn find_by_id_after_create() {
        let svc = service();
        let created = svc.create(loft()).unwrap();
        let found = svc.find_by_id(&created.id).unwrap().unwrap();
        assert_eq!(found, created);
        assert!(svc.find_by_id("missing").unwrap().is_none());
    }

    #[test]
    fn empty_update_only_moves_updated_at() {
        let svc = service();
        let created = svc.create(loft()).unwrap();
        let updated = svc
            .update(&created.id, &PropertyPatch::default())
            .unwrap()
            .unwrap();

        assert!(updated.updated_at > created.updated_at);
        assert_eq!(
            Property { updated_at: created.updated_at, ..updated },
            created
        );
    }

    #[test]
    fn update_merges_supplied_fields() {
        let svc = service();
        let created = svc.create(loft()).unwrap();
        let patch = PropertyPatch {
            price: Some(310_000.0),
            ..Default::default()
        };
        let updated = svc.update(&created.id, &patch).unwrap().unwrap();

        assert_eq!(updated.price, 310_000.0);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.city, created.city);
        assert_eq!(updated.surface, created.surface);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > updated.created_at);
    }

    #[test]
    fn successive_updates_strictly_increase() {
        let svc = service();
        let created = svc.create(loft()).unwrap();
        let mut last = created.updated_at;
        for _ in 0..50 {
            let p = svc
                .update(&created.id, &PropertyPatch::default())
                .unwrap()
                .unwrap();
            assert!(p.updated_at > last);
            last = p.updated_at;
        }
    }

    #[test]
    fn update_unknown_is_none() {
        let svc = service();
        assert!(svc.update("nope", &PropertyPatch::default()).unwrap().is_none());
    }

    #[test]
    fn delete_then_find_is_empty() {
        let svc = service();
        let created = svc.create(loft()).unwrap();
        svc.create(loft()).unwrap();

        assert!(svc.delete(&created.id).unwrap());
        assert!(svc.find_by_id(&created.id).unwrap().is_none());
        assert_eq!(svc.store().len().unwrap(), 1);
    }

    #[test]
    fn delete_unknown_leaves_store_alone() {
        let svc = service();
        svc.create(loft()).unwrap();
        assert!(!svc.delete("unknown").unwrap());
        assert_eq!(svc.store().len().unwrap(), 1);
    }

    #[test]
    fn concurrent_writers_keep_ids_unique() {
        let svc = Arc::new(service());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let svc = Arc::clone(&svc);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let p = svc.create(loft()).unwrap();
                        svc.update(&p.id, &PropertyPatch::default()).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let all = svc.find_all().unwrap();
        let ids: HashSet<&str> = all.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(all.len(), 400);
        assert_eq!(ids.len(), 400);
        assert!(all.iter().all(|p| p.updated_at > p.created_at));
    }
}
